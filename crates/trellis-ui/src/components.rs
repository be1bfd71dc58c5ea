mod layout;
mod task_hierarchy;

pub use layout::Layout;
pub use task_hierarchy::TaskHierarchy;

use yew::{Html, Properties, function_component, html};

use trellis_core::model::{TaskPriority, TaskStatus};
use trellis_core::presentation::{self, StatusIcon};

pub fn status_icon_glyph(icon: StatusIcon) -> &'static str {
    match icon {
        StatusIcon::Alert => "⚠",
        StatusIcon::Clock => "◷",
        StatusIcon::Check => "✓",
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    pub status: TaskStatus,
}

#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    let visual = presentation::status_visual(props.status);
    html! {
        <span class={visual.badge_class}>
            <span class="badge-icon">{ status_icon_glyph(visual.icon) }</span>
            { visual.label }
        </span>
    }
}

#[derive(Properties, PartialEq)]
pub struct PriorityBadgeProps {
    pub priority: TaskPriority,
}

#[function_component(PriorityBadge)]
pub fn priority_badge(props: &PriorityBadgeProps) -> Html {
    let visual = presentation::priority_visual(props.priority);
    html! { <span class={visual.badge_class}>{ visual.label }</span> }
}

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: Option<String>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    match &props.message {
        Some(message) => html! { <div class="error-banner">{ message }</div> },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct TagBadgeProps {
    pub name: String,
    pub color: String,
}

#[function_component(TagBadge)]
pub fn tag_badge(props: &TagBadgeProps) -> Html {
    let style = if props.color.is_empty() {
        String::new()
    } else {
        format!("--tag-color:{};", props.color)
    };
    html! { <span class="badge tag-badge" {style}>{ format!("#{}", props.name) }</span> }
}
