mod ai_settings;
mod dashboard;
mod login;
mod register;
mod task_detail;
mod task_form;
mod task_list;

pub use ai_settings::AiSettingsPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use register::RegisterPage;
pub use task_detail::TaskDetailPage;
pub use task_form::{CreateTaskPage, EditTaskPage};
pub use task_list::TaskListPage;
