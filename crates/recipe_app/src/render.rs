use recipe_core::{source_host, AppViewModel, DetailView, Recipe, SearchView, ViewKind};

/// Renders the view model as plain text lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    if !view.network_available {
        lines.push("No network connection".to_string());
    }
    if let Some(detail) = &view.detail {
        render_detail(detail, &mut lines);
    }
    if !view.search.query.is_empty() || !view.search.rows.is_empty() {
        render_search(&view.search, &mut lines);
    }
    if let Some(dialog) = &view.dialog {
        let mut line = format!("[{}] {}", dialog.title, dialog.message);
        if view.pending_dialogs > 0 {
            line.push_str(&format!(" (+{} more)", view.pending_dialogs));
        }
        lines.push(line);
    }
    lines
}

fn render_detail(detail: &DetailView, lines: &mut Vec<String>) {
    match &detail.kind {
        ViewKind::ShimmerPlaceholderView => lines.push("Loading recipe...".to_string()),
        ViewKind::InvalidRecipeView => lines.push("Invalid recipe".to_string()),
        ViewKind::FailedView(reason) => lines.push(format!("Could not load recipe: {reason}")),
        ViewKind::RecipeContentView(recipe) => render_recipe(recipe, lines),
    }
}

fn render_recipe(recipe: &Recipe, lines: &mut Vec<String>) {
    lines.push(format!("{} (#{})", recipe.title, recipe.id));
    let byline = match source_host(recipe) {
        Some(host) => format!("by {} via {}", recipe.publisher, host),
        None => format!("by {}", recipe.publisher),
    };
    lines.push(byline);
    lines.push(format!("Rating: {}", recipe.rating));
    if let Some(updated) = recipe.date_updated.as_ref().or(recipe.date_added.as_ref()) {
        lines.push(format!("Updated: {updated}"));
    }
    if !recipe.ingredients.is_empty() {
        lines.push("Ingredients:".to_string());
        lines.extend(recipe.ingredients.iter().map(|item| format!("  - {item}")));
    }
}

fn render_search(search: &SearchView, lines: &mut Vec<String>) {
    let mut header = format!(
        "Results for \"{}\": {} of {}",
        search.query,
        search.rows.len(),
        search.total_results
    );
    if search.is_loading {
        header.push_str(" (loading)");
    }
    lines.push(header);
    lines.extend(search.rows.iter().map(|row| {
        format!(
            "  #{:<6} {} - {} ({})",
            row.id, row.title, row.publisher, row.rating
        )
    }));
    if let Some(failure) = search.failure {
        lines.push(format!("Search failed: {failure}"));
    } else if search.has_more {
        lines.push(format!("More results available (page {} loaded)", search.page));
    }
}
