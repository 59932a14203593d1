use crate::core::icon::ProductIcon;
use crate::core::map_view::MapView;
use crate::core::session::MapState;
use crate::core::stops::{clean_line_name, group_lines_by_product};
use crate::domain::model::{LoadingState, Position, Product, Stop};
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Serialize)]
pub struct LineGroupView {
    pub product: Product,
    pub icon: ProductIcon,
    pub lines: Vec<String>,
}

/// Sidebar content for one stop.
#[derive(Debug, Clone, Serialize)]
pub struct StopInfoView {
    pub id: String,
    pub name: String,
    pub groups: Vec<LineGroupView>,
}

impl StopInfoView {
    pub fn from_stop(stop: &Stop) -> Self {
        let groups = group_lines_by_product(&stop.lines)
            .into_iter()
            .map(|(product, lines)| LineGroupView {
                product,
                icon: ProductIcon::new(product),
                lines: lines.iter().map(|line| clean_line_name(&line.name)).collect(),
            })
            .collect();

        Self {
            id: stop.id.clone(),
            name: stop.name.clone(),
            groups,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerView {
    pub stop_id: String,
    pub name: String,
    pub position: Position,
    pub icon: ProductIcon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// What the widget shows, in a form that can be printed or serialized.
#[derive(Debug, Clone, Serialize)]
pub struct MapSnapshot<'a> {
    pub map: &'a MapView,
    pub position: Option<Position>,
    pub address: Option<&'a str>,
    pub loading: LoadingState,
    pub markers: Vec<MarkerView>,
    pub sidebar: Option<StopInfoView>,
}

impl<'a> MapSnapshot<'a> {
    pub fn new(map: &'a MapView, state: &'a MapState) -> Self {
        let markers = state
            .markers()
            .into_iter()
            .filter_map(|marker| {
                let stop = state.stops.iter().find(|stop| stop.id == marker.stop_id)?;
                Some(MarkerView {
                    name: stop.name.clone(),
                    distance: stop.distance,
                    icon: ProductIcon::circled(marker.product),
                    stop_id: marker.stop_id,
                    position: marker.position,
                })
            })
            .collect();

        let sidebar = if state.sidebar_open() {
            state.selected_stop().map(StopInfoView::from_stop)
        } else {
            None
        };

        Self {
            map,
            position: state.position,
            address: state.address.as_deref(),
            loading: state.loading,
            markers,
            sidebar,
        }
    }
}

pub fn render_header(address: Option<&str>) -> String {
    match address {
        Some(address) => format!("📍 {}", address),
        None => "📍".to_string(),
    }
}

pub fn render_stop_info(info: &StopInfoView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", info.name);
    let _ = writeln!(out, "{}", "=".repeat(info.name.chars().count()));
    for group in &info.groups {
        let _ = writeln!(out, "{} {}", group.icon, group.lines.join(", "));
    }
    out
}

pub fn render_text(snapshot: &MapSnapshot<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", render_header(snapshot.address));

    if snapshot.loading == LoadingState::Loading {
        let _ = writeln!(out, "⏳ Lade Haltestellen ...");
    } else if snapshot.markers.is_empty() && snapshot.position.is_some() {
        let _ = writeln!(out, "Keine Haltestellen in der Nähe");
    }

    for marker in &snapshot.markers {
        let distance = marker
            .distance
            .map(|d| format!(" ({:.0} m)", d))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {} {} [{}]{}",
            marker.icon, marker.name, marker.stop_id, distance
        );
    }

    if let Some(info) = &snapshot.sidebar {
        let _ = writeln!(out);
        out.push_str(&render_stop_info(info));
    }
    out
}

pub fn render_json(snapshot: &MapSnapshot<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}
