//! HTML rendering for the expenses page.
//!
//! All markup for the page is produced here; the route handler only decides
//! what goes into [ExpensesView].

use maud::{Markup, html};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    alert::Alert,
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_amount,
    },
    navigation::NavBar,
};

use super::{models::ExpenseTableRow, query::SortKey};

/// The max number of graphemes to display in the description cells before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// Everything the expenses page needs to render.
pub(crate) struct ExpensesView<'a> {
    /// The table rows, already ordered and with visibility applied.
    pub(crate) rows: Vec<ExpenseTableRow>,
    /// The sum of all fetched amounts, filtered rows included.
    pub(crate) total: f64,
    /// The raw date filter value, echoed back into the filter input.
    pub(crate) filter_date: Option<&'a str>,
    /// The active row ordering.
    pub(crate) sort: Option<SortKey>,
    /// A banner shown above the table instead of a browser alert dialog.
    pub(crate) alert: Option<Alert>,
}

pub(crate) fn expenses_view(view: ExpensesView) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();
    let rows_empty = view.rows.is_empty();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-4xl lg:mx-auto"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Expenses" }

                    a href=(endpoints::NEW_EXPENSE_VIEW) class=(LINK_STYLE)
                    {
                        "Add Expense"
                    }
                }

                @if let Some(alert) = view.alert {
                    (alert.into_html())
                }

                (filter_sort_controls(view.filter_date, view.sort))

                section class="rounded bg-gray-50 dark:bg-gray-800 overflow-hidden"
                {
                    table class="w-full my-2 text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Description"
                                }
                                th scope="col" class="px-6 py-3 text-right"
                                {
                                    "Amount"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Date"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Category"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Actions"
                                }
                            }
                        }

                        tbody
                        {
                            @for row in &view.rows {
                                (expense_row_view(row))
                            }

                            @if rows_empty {
                                tr
                                {
                                    td
                                        colspan="5"
                                        data-empty-state="true"
                                        class="px-6 py-4 text-center"
                                    {
                                        "No expenses to show."
                                    }
                                }
                            }
                        }
                    }
                }

                p class="text-right font-semibold text-gray-900 dark:text-white"
                {
                    "Total: "
                    span id="total-amount" data-total-amount="true"
                    {
                        (format_amount(view.total))
                    }
                }
            }
        }
    };

    base("Expenses", &content)
}

fn filter_sort_controls(filter_date: Option<&str>, sort: Option<SortKey>) -> Markup {
    // A sort link keeps the active filter, and the filter form keeps the
    // active sort, so the two controls compose instead of resetting each
    // other.
    let filter_for_links = filter_date.filter(|value| !value.is_empty());
    let sort_by_amount_href = sort_url(SortKey::Amount, filter_for_links);
    let sort_by_date_href = sort_url(SortKey::Date, filter_for_links);

    html! {
        div class="flex flex-wrap items-center gap-4 text-sm"
        {
            form
                method="get"
                action=(endpoints::EXPENSES_VIEW)
                class="flex items-end gap-2"
                data-filter-form="true"
            {
                div
                {
                    label for="filter-date" class=(FORM_LABEL_STYLE)
                    {
                        "Filter by date"
                    }

                    input
                        type="date"
                        name="filter_date"
                        id="filter-date"
                        class=(FORM_TEXT_INPUT_STYLE)
                        value=[filter_date];
                }

                @if let Some(sort) = sort {
                    input type="hidden" name="sort" value=(sort.as_query_value());
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Filter" }
            }

            a href=(sort_by_amount_href) class=(LINK_STYLE) data-sort-amount="true"
            {
                "Sort by amount"
            }

            a href=(sort_by_date_href) class=(LINK_STYLE) data-sort-date="true"
            {
                "Sort by date"
            }

            a href=(endpoints::EXPENSES_VIEW) class=(LINK_STYLE)
            {
                "Reset"
            }
        }
    }
}

fn sort_url(key: SortKey, filter_date: Option<&str>) -> String {
    let mut params = vec![("sort", key.as_query_value())];

    if let Some(filter_date) = filter_date {
        params.push(("filter_date", filter_date));
    }

    match serde_urlencoded::to_string(params) {
        Ok(query) => format!("{}?{query}", endpoints::EXPENSES_VIEW),
        Err(error) => {
            tracing::error!("Could not encode sort link query: {error}");
            endpoints::EXPENSES_VIEW.to_owned()
        }
    }
}

fn expense_row_view(row: &ExpenseTableRow) -> Markup {
    let (description, tooltip) = format_description(&row.description);
    let date_display = date_display(row.date);
    let confirm_message = format!(
        "Are you sure you want to delete the expense '{}'?",
        row.description
    );
    let confirm_attr = format!("return confirm('{}')", confirm_message.replace('\'', "\\'"));
    // Hidden rows stay in the document so the filter suppresses display
    // without discarding any record.
    let style = (!row.visible).then_some("display: none");

    html! {
        tr class=(TABLE_ROW_STYLE) data-expense-row="true" style=[style]
        {
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (description) }
            td class="px-6 py-4 text-right" data-amount-cell="true"
            {
                (format_amount(row.amount))
            }
            td class=(TABLE_CELL_STYLE) data-date-cell="true"
            {
                time datetime=(date_display) { (date_display) }
            }
            td class=(TABLE_CELL_STYLE) data-category-cell="true"
            {
                @if let Some(ref category) = row.category { (category) }
            }
            td class=(TABLE_CELL_STYLE)
            {
                form method="post" action=(row.delete_url) class="inline"
                {
                    button type="submit" class=(BUTTON_DELETE_STYLE) onclick=(confirm_attr)
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}

const DATE_DISPLAY_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

fn date_display(date: Date) -> String {
    date.format(DATE_DISPLAY_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

fn format_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        let truncated = truncated + "...";
        (truncated, Some(description))
    }
}
