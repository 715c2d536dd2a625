//! services/admin/src/render.rs
//!
//! Plain-text rendering of lists and the lesson editor.

use std::fmt::Write;

use lesson_admin_core::domain::{ContentType, Lesson, Program};
use lesson_admin_core::edit_session::EditView;
use lesson_admin_core::list_view::{Listing, LoadStatus};

const NONE: &str = "—";

fn or_none<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| NONE.to_string())
}

pub fn lessons(listing: &Listing<Lesson>) -> String {
    let mut out = String::new();
    if listing.status == LoadStatus::Error {
        let _ = writeln!(out, "Error: {}", or_none(listing.error_message.as_deref()));
    }
    if listing.items.is_empty() && listing.status == LoadStatus::Success {
        out.push_str("No lessons.\n");
    }
    for lesson in &listing.items {
        let _ = writeln!(out, "{} [{}]", lesson.title, lesson.status);
        let _ = writeln!(out, "  id:           {}", lesson.id);
        let _ = writeln!(out, "  publish at:   {}", or_none(lesson.publish_at));
        let _ = writeln!(out, "  published at: {}", or_none(lesson.published_at));
        let _ = writeln!(out, "  paid:         {}", yes_no(lesson.is_paid));
        let _ = writeln!(out, "  type:         {}", lesson.content_type);
        if lesson.content_type == ContentType::Video {
            let _ = writeln!(out, "  duration ms:  {}", or_none(lesson.duration_ms));
        }
    }
    if let Some(updated) = listing.last_updated {
        let _ = writeln!(out, "Last updated: {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    out
}

pub fn programs(listing: &Listing<Program>) -> String {
    let mut out = String::new();
    if listing.status == LoadStatus::Error {
        let _ = writeln!(out, "Error: {}", or_none(listing.error_message.as_deref()));
    }
    if listing.items.is_empty() {
        return out;
    }
    let _ = writeln!(out, "{:<32} {:<18} {}", "Title", "Primary Language", "Status");
    for program in &listing.items {
        let _ = writeln!(
            out,
            "{:<32} {:<18} {}",
            program.title, program.language_primary, program.status
        );
    }
    out
}

pub fn editor(view: &EditView) -> String {
    let mut out = String::new();
    let title = if view.title.is_empty() { "Lesson" } else { view.title.as_str() };
    let _ = writeln!(out, "Edit: {}", title);
    for line in [
        view.validation_error.map(|v| v.to_string()),
        view.api_error.clone(),
    ]
    .into_iter()
    .flatten()
    {
        let _ = writeln!(out, "Error: {}", line);
    }
    if let Some(success) = &view.success_message {
        let _ = writeln!(out, "{}", success);
    }
    let form = &view.form;
    let publish_at = if form.publish_at.is_empty() {
        NONE
    } else {
        form.publish_at.as_str()
    };
    let _ = writeln!(out, "  status:       {}", form.status);
    let _ = writeln!(out, "  publish at:   {}", publish_at);
    let _ = writeln!(out, "  paid:         {}", yes_no(form.is_paid));
    let _ = writeln!(out, "  type:         {}", form.content_type);
    if form.content_type == ContentType::Video {
        let _ = writeln!(out, "  duration ms:  {}", or_none(form.duration_ms));
    }
    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}
