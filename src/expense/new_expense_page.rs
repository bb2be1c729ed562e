//! The page with the form for recording a new expense.

use axum::extract::{FromRef, State};
use maud::{Markup, html};

use crate::{
    AppState, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base,
    },
    navigation::NavBar,
};

/// The state needed for the new-expense page.
#[derive(Debug, Clone)]
pub struct NewExpenseViewState {
    /// The base URL of the backend, used to address its add endpoint.
    backend_url: String,
}

impl FromRef<AppState> for NewExpenseViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            backend_url: state.backend_url.clone(),
        }
    }
}

/// Render the form for recording a new expense.
///
/// The form posts straight to the backend's add endpoint as a standard form
/// submission; the backend owns creation and redirects wherever it sees fit.
pub async fn get_new_expense_page(State(state): State<NewExpenseViewState>) -> Markup {
    new_expense_view(&state.backend_url)
}

fn new_expense_view(backend_url: &str) -> Markup {
    let action = endpoints::backend_url(backend_url, endpoints::BACKEND_ADD);
    let nav_bar = NavBar::new(endpoints::NEW_EXPENSE_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full max-w-md"
            {
                h1 class="text-xl font-bold" { "Add Expense" }

                form
                    method="post"
                    action=(action)
                    class="flex flex-col gap-4"
                    data-new-expense-form="true"
                {
                    div
                    {
                        label for="description" class=(FORM_LABEL_STYLE) { "Description" }
                        input
                            type="text"
                            name="description"
                            id="description"
                            class=(FORM_TEXT_INPUT_STYLE)
                            required
                            autofocus;
                    }

                    div
                    {
                        label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                        input
                            type="number"
                            name="amount"
                            id="amount"
                            step="0.01"
                            min="0"
                            class=(FORM_TEXT_INPUT_STYLE)
                            required;
                    }

                    div
                    {
                        label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                        input
                            type="date"
                            name="date"
                            id="date"
                            class=(FORM_TEXT_INPUT_STYLE)
                            required;
                    }

                    div
                    {
                        label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                        input
                            type="text"
                            name="category"
                            id="category"
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add" }
                }
            }
        }
    };

    base("Add Expense", &content)
}
