//! CLI presentation: text tables and JSON rendering of library results.

use crate::content::ContentTree;
use crate::error::ContentError;
use crate::host::{Site, SiteSnapshot};
use crate::resolve::PathResult;
use crate::types::NodeRef;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde_json::json;

fn site_json(site: &Site, is_default: bool) -> serde_json::Value {
    json!({
        "name": site.name,
        "default": is_default,
        "root_id": site.root_id,
        "start_page_id": site.start_page_id,
        "wildcards": site.wildcards,
        "upload_folders": site.upload_folders,
        "settings": site.settings,
    })
}

/// Render the default site followed by the registered sites
pub fn format_sites(snapshot: &SiteSnapshot, format: &str) -> Result<String, ContentError> {
    if format == "json" {
        let mut rows = vec![site_json(&snapshot.default_site, true)];
        rows.extend(snapshot.sites.iter().map(|s| site_json(s, false)));
        return Ok(serde_json::to_string_pretty(&rows)?);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Site", "Root", "Start Page", "Wildcards", "Upload Folders"]);
    let rows = std::iter::once((&snapshot.default_site, true))
        .chain(snapshot.sites.iter().map(|s| (s, false)));
    for (site, is_default) in rows {
        let name = if is_default {
            "(default)".to_string()
        } else {
            site.name.clone()
        };
        table.add_row(vec![
            name,
            site.root_id.to_string(),
            site.start_page_id.to_string(),
            if site.wildcards { "yes" } else { "no" }.to_string(),
            site.upload_folders.join(", "),
        ]);
    }
    Ok(table.to_string())
}

/// Render a path resolution and, when an item was found, its URL
pub fn format_resolution(
    tree: &ContentTree,
    result: &PathResult,
    extension: &str,
    format: &str,
) -> Result<String, ContentError> {
    let bound = match result.item {
        Some(node) => {
            let item = tree.item(node)?;
            Some((item, tree.path(node)?, tree.url(node, extension)?))
        }
        None => None,
    };

    if format == "json" {
        let item = bound.as_ref().map(|(item, path, url)| {
            json!({
                "id": item.id,
                "kind": item.kind,
                "title": item.title,
                "path": path,
                "url": url,
            })
        });
        let value = json!({
            "item": item,
            "remaining": result.remaining,
            "action": result.action(),
            "argument": result.argument(),
            "query": result.query,
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let Some((item, path, url)) = bound else {
        return Ok("No item resolved".to_string());
    };
    let mut lines = vec![
        format!("Item:      {} ({:?}, id {})", item.title, item.kind, item.id),
        format!("Path:      {}", path),
        format!("URL:       {}", url),
        format!("Action:    {}", result.action()),
    ];
    if !result.argument().is_empty() {
        lines.push(format!("Argument:  {}", result.argument()));
    }
    for (key, value) in &result.query {
        lines.push(format!("Query:     {} = {}", key, value));
    }
    Ok(lines.join("\n"))
}

/// Render every item below `root` in tree order
pub fn format_tree(tree: &ContentTree, root: NodeRef) -> Result<String, ContentError> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Item", "Id", "Kind", "Zone", "Sort", "Path"]);
    for node in tree.descendants_and_self(root) {
        let item = tree.item(node)?;
        let depth = tree.ancestors(node).len() - tree.ancestors(root).len();
        table.add_row(vec![
            format!("{}{}", "  ".repeat(depth), item.name_or_id()),
            item.id.to_string(),
            format!("{:?}", item.kind),
            item.zone_name.clone().unwrap_or_default(),
            item.sort_order.to_string(),
            tree.path(node)?,
        ]);
    }
    Ok(table.to_string())
}
