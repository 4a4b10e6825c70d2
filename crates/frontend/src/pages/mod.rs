mod dashboard;
mod home;
mod login;

pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use login::LoginPage;
