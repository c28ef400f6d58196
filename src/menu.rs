// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Sidebar navigation. Each page link maps to the command that renders it.

use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: u32,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_title: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_items: Vec<MenuItem>,
}

impl MenuItem {
    fn title(id: u32, label: &'static str) -> Self {
        Self {
            id,
            label,
            icon: None,
            link: None,
            is_title: true,
            parent_id: None,
            sub_items: Vec::new(),
        }
    }

    fn link(id: u32, label: &'static str, link: &'static str) -> Self {
        Self {
            id,
            label,
            icon: None,
            link: Some(link),
            is_title: false,
            parent_id: None,
            sub_items: Vec::new(),
        }
    }

    fn group(id: u32, label: &'static str, sub_items: Vec<MenuItem>) -> Self {
        Self {
            id,
            label,
            icon: None,
            link: None,
            is_title: false,
            parent_id: None,
            sub_items,
        }
    }

    fn icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    fn child_of(mut self, parent: u32) -> Self {
        self.parent_id = Some(parent);
        self
    }
}

pub static MENU: Lazy<Vec<MenuItem>> = Lazy::new(|| {
    vec![
        MenuItem::title(1, "MENÚ PRINCIPAL"),
        MenuItem::link(2, "Clientes", "/general/clientes/list").icon("ri-user-line"),
        MenuItem::group(
            3,
            "Cotizaciones",
            vec![
                MenuItem::link(4, "Listado", "/general/cotizaciones/list").child_of(3),
                MenuItem::link(5, "Reporte", "/general/cotizaciones/report").child_of(3),
            ],
        )
        .icon("ri-file-list-3-line"),
    ]
});

/// CLI command for a page link.
pub fn command_for(link: &str) -> Option<&'static str> {
    match link {
        "/general/clientes/list" => Some("cotiza client list"),
        "/general/cotizaciones/list" => Some("cotiza quote list"),
        "/general/cotizaciones/create" => Some("cotiza quote add"),
        "/general/cotizaciones/report" => Some("cotiza report"),
        _ => None,
    }
}

/// Depth-first search over the menu tree.
pub fn find(items: &[MenuItem], id: u32) -> Option<&MenuItem> {
    items.iter().find_map(|item| {
        if item.id == id {
            Some(item)
        } else {
            find(&item.sub_items, id)
        }
    })
}

pub fn render(items: &[MenuItem]) -> String {
    let mut out = String::new();
    render_into(items, 0, &mut out);
    out
}

fn render_into(items: &[MenuItem], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for item in items {
        if item.is_title {
            out.push_str(&format!("{}{}\n", indent, item.label));
            continue;
        }
        let target = item.link.and_then(command_for);
        match target {
            Some(cmd) => out.push_str(&format!("{}• {}  ({})\n", indent, item.label, cmd)),
            None => out.push_str(&format!("{}• {}\n", indent, item.label)),
        }
        render_into(&item.sub_items, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_pages_nest_under_their_parent() {
        let parent = find(&MENU, 3).unwrap();
        assert!(!parent.is_title);
        assert!(parent.link.is_none());
        assert_eq!(parent.sub_items.len(), 2);
        assert!(parent.sub_items.iter().all(|c| c.parent_id == Some(3)));
    }

    #[test]
    fn every_link_has_a_command() {
        fn walk(items: &[MenuItem]) {
            for item in items {
                if let Some(link) = item.link {
                    assert!(command_for(link).is_some(), "no command for {}", link);
                }
                walk(&item.sub_items);
            }
        }
        walk(&MENU);
    }

    #[test]
    fn render_shows_tree() {
        let text = render(&MENU);
        assert!(text.starts_with("MENÚ PRINCIPAL\n"));
        assert!(text.contains("  • Reporte  (cotiza report)"));
    }
}
