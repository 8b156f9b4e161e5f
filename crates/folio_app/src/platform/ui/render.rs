use std::fmt::Write;

use folio_core::{
    AppViewModel, ContentView, DeviceClass, NavControls, PageLayout, SpreadMode, ThumbnailView,
    LOADING_TEXT, NO_PAGES_TEXT,
};

use super::constants::*;

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    if let Some(meta) = &view.metadata {
        let _ = writeln!(out, "== {} ==", meta.title);
        let _ = writeln!(out, "{} | {} | {}", meta.date, meta.author, meta.publisher);
        let _ = writeln!(out, "{}", meta.summary);
        let _ = writeln!(out, "{}", meta.keywords);
    }
    if view.loading {
        let _ = writeln!(out, "{LOADING_TEXT}");
    }

    match &view.content {
        ContentView::NotLoaded => {}
        ContentView::Failed { message } => {
            let _ = writeln!(out, "Error: {message}");
        }
        ContentView::NoPages => {
            let _ = writeln!(out, "{NO_PAGES_TEXT}");
        }
        ContentView::Ready => {
            let _ = writeln!(out, "{}", format_layout(&view.layout));
            for page in &view.visible_pages {
                let _ = writeln!(out, "  [page {:>3}] {}", page.index + 1, page.image_url);
            }
            let _ = writeln!(out, "{}", format_controls(&view.controls, view.is_flipping));
            let _ = writeln!(out, "{}", format_thumbnails(&view.thumbnails));
        }
    }

    out
}

fn format_layout(layout: &PageLayout) -> String {
    let device = match layout.device {
        DeviceClass::Mobile => "mobile",
        DeviceClass::Tablet => "tablet",
        DeviceClass::Desktop => "desktop",
    };
    let mode = match layout.spread_mode {
        SpreadMode::Single => "single page",
        SpreadMode::Double => "double spread",
    };
    format!(
        "Layout: {device}, {mode}, page {:.0}x{:.0}",
        layout.page_width, layout.page_height
    )
}

fn format_controls(controls: &NavControls, flipping: bool) -> String {
    let prev = if controls.prev_enabled {
        PREV_ENABLED
    } else {
        PREV_DISABLED
    };
    let next = if controls.next_enabled {
        NEXT_ENABLED
    } else {
        NEXT_DISABLED
    };
    let mut line = format!("{prev}  {}  {next}", controls.page_label);
    if flipping {
        line.push_str("  (turning)");
    }
    line
}

fn format_thumbnails(thumbnails: &[ThumbnailView]) -> String {
    thumbnails
        .iter()
        .map(|thumb| {
            if thumb.is_visible {
                format!("[{}]", thumb.index + 1)
            } else {
                format!(" {} ", thumb.index + 1)
            }
        })
        .collect::<Vec<_>>()
        .join("")
}
