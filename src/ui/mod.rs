//! User interface
//!
//! The terminal front end is always available; the Dioxus components need the `desktop` feature.

#[cfg(feature = "desktop")]
pub mod quote_card;
#[cfg(feature = "desktop")]
pub mod saved_list;
pub mod terminal;

#[cfg(feature = "desktop")]
pub use layout::Layout;

/// Count of actions still waiting on the session
///
/// Busy while at least one dispatched action is outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pending(usize);

impl Pending {
    pub fn begin(&mut self) {
        self.0 += 1;
    }

    pub fn finish(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    pub fn is_busy(&self) -> bool {
        self.0 > 0
    }
}

#[cfg(feature = "desktop")]
mod layout {
    use crate::ui::quote_card::QuoteCard;
    use crate::ui::saved_list::SavedList;
    use dioxus::prelude::*;

    #[component]
    pub fn Layout() -> Element {
        rsx! {
            div {
                class: "min-h-screen overflow-y-auto py-8",
                h1 {
                    class: "text-center text-4xl font-bold mb-6",
                    "Quotes App"
                }
                div {
                    class: "max-w-xl mx-auto rounded-2xl p-5",
                    QuoteCard {}
                    SavedList {}
                }
            }
        }
    }
}
