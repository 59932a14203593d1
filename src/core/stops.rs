use crate::domain::model::{Line, Product, Stop};
use std::collections::HashSet;

/// Default city fragments stripped from stop names.
pub const DEFAULT_NAME_FRAGMENTS: [&str; 2] = [", Frankfurt a.M.", "Frankfurt(M)"];

/// Product prefixes stripped from line names ("S 8" -> "8").
const LINE_PREFIXES: [&str; 4] = ["Bus ", "S ", "U ", "STR "];

/// 處理 "nearby" 查詢回傳的站點
///
/// A platform stop whose station is itself part of the response is dropped,
/// the station already stands for it. Remaining names lose the configured
/// city fragments.
pub fn parse_stops<S: AsRef<str>>(data: Vec<Stop>, name_fragments: &[S]) -> Vec<Stop> {
    let station_ids: HashSet<String> = data.iter().map(|stop| stop.id.clone()).collect();

    let mut stops = Vec::with_capacity(data.len());
    for mut stop in data {
        if let Some(station) = &stop.station {
            if station_ids.contains(&station.id) {
                tracing::trace!("Skipping {} ({}), station {} is listed", stop.name, stop.id, station.id);
                continue;
            }
        }
        stop.name = clean_stop_name(&stop.name, name_fragments);
        stops.push(stop);
    }
    stops
}

/// Removes the first occurrence of every fragment, then trims.
pub fn clean_stop_name<S: AsRef<str>>(name: &str, fragments: &[S]) -> String {
    let mut cleaned = name.to_string();
    for fragment in fragments {
        let fragment = fragment.as_ref();
        if !fragment.is_empty() {
            cleaned = cleaned.replacen(fragment, "", 1);
        }
    }
    cleaned.trim().to_string()
}

pub fn clean_line_name(name: &str) -> String {
    LINE_PREFIXES
        .iter()
        .fold(name.to_string(), |acc, prefix| acc.replacen(prefix, "", 1))
}

/// Groups lines by product. Groups keep the order in which their product
/// first appears, lines keep response order.
pub fn group_lines_by_product(lines: &[Line]) -> Vec<(Product, Vec<&Line>)> {
    let mut groups: Vec<(Product, Vec<&Line>)> = Vec::new();
    for line in lines {
        match groups.iter_mut().find(|(product, _)| *product == line.product) {
            Some((_, group)) => group.push(line),
            None => groups.push((line.product, vec![line])),
        }
    }
    groups
}
