use media3p_core::{Category, MediaItem, MediaType, MediaViewModel, ProviderRowView};

pub fn render_status(view: &MediaViewModel) -> String {
    let search = if view.search_term.is_empty() {
        "-".to_string()
    } else {
        format!("\"{}\"", view.search_term)
    };
    let tabs: Vec<String> = view.providers.iter().map(render_tab).collect();
    format!("Search: {} | {}", search, tabs.join(" | "))
}

fn render_tab(row: &ProviderRowView) -> String {
    let marker = if row.is_selected { "*" } else { "" };
    let state = if row.is_loading {
        "loading"
    } else if row.has_error {
        "error"
    } else if row.is_loaded {
        "loaded"
    } else {
        "idle"
    };
    let mut text = format!("{}{}: {} items ({})", marker, row.provider, row.media_count, state);
    if let Some(category) = &row.selected_category_id {
        text.push_str(&format!(" in {category}"));
    }
    if row.is_loaded && row.has_more {
        text.push_str(", more available");
    }
    text
}

pub fn render_media(media: &[MediaItem]) -> Vec<String> {
    media
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let kind = match item.media_type {
                MediaType::Image => "image",
                MediaType::Video => "video",
                MediaType::Gif => "gif",
                MediaType::Unknown => "media",
            };
            let size = match (item.width, item.height) {
                (Some(w), Some(h)) => format!(" {w}x{h}"),
                _ => String::new(),
            };
            let author = item
                .author_name
                .as_deref()
                .map(|name| format!(" by {name}"))
                .unwrap_or_default();
            let url = item.url.as_deref().unwrap_or("-");
            format!("{:>3}. [{}{}] {}{} {}", index + 1, kind, size, item.name, author, url)
        })
        .collect()
}

pub fn render_categories(categories: &[Category]) -> Vec<String> {
    categories
        .iter()
        .map(|category| format!("{}\t{}", category.id, category.label))
        .collect()
}
