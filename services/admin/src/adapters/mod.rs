pub mod http;
pub mod navigator;
pub mod token_store;

pub use http::HttpLessonApi;
pub use navigator::TerminalNavigator;
pub use token_store::FileCredentialStore;
