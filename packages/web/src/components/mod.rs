//! UI components

mod error_view;
mod loading;
mod results;
mod scanner;

pub use error_view::ErrorView;
pub use loading::LoadingView;
pub use results::ResultsView;
pub use scanner::Scanner;
