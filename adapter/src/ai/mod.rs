mod client;
mod suggestion;

pub use client::CompletionClient;
pub use suggestion::SuggestionAdapter;
