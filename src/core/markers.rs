use crate::domain::model::{Product, Products, Stop, StopMarker};

/// Later entries override earlier ones when a stop serves several products.
const MARKER_PRECEDENCE: [Product; 8] = [
    Product::Bus,
    Product::Tram,
    Product::Subway,
    Product::Suburban,
    Product::National,
    Product::NationalExpress,
    Product::Regional,
    Product::RegionalExpress,
];

/// Picks the product whose icon represents the stop on the map.
/// Ferry or taxi alone do not get a marker.
pub fn marker_product(products: &Products) -> Option<Product> {
    MARKER_PRECEDENCE
        .iter()
        .rev()
        .copied()
        .find(|product| products.has(*product))
}

pub fn stop_markers(stops: &[Stop]) -> Vec<StopMarker> {
    stops
        .iter()
        .filter_map(|stop| {
            let product = marker_product(&stop.products)?;
            Some(StopMarker {
                stop_id: stop.id.clone(),
                position: stop.location.into(),
                product,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Location;

    fn stop_with(id: &str, products: Products) -> Stop {
        Stop {
            id: id.to_string(),
            location: Location {
                latitude: 50.1,
                longitude: 8.6,
            },
            name: id.to_string(),
            products,
            lines: vec![],
            kind: "stop".to_string(),
            station: None,
            distance: None,
        }
    }

    #[test]
    fn test_marker_product_precedence() {
        let bus_and_tram = Products {
            bus: true,
            tram: true,
            ..Default::default()
        };
        assert_eq!(marker_product(&bus_and_tram), Some(Product::Tram));

        let tram_and_subway = Products {
            tram: true,
            subway: true,
            ..Default::default()
        };
        assert_eq!(marker_product(&tram_and_subway), Some(Product::Subway));

        let subway_and_suburban = Products {
            subway: true,
            suburban: true,
            bus: true,
            ..Default::default()
        };
        assert_eq!(marker_product(&subway_and_suburban), Some(Product::Suburban));

        let hub = Products {
            bus: true,
            suburban: true,
            national_express: true,
            regional: true,
            ..Default::default()
        };
        assert_eq!(marker_product(&hub), Some(Product::Regional));
    }

    #[test]
    fn test_marker_product_regional_express_wins() {
        let all = Products {
            bus: true,
            ferry: true,
            national: true,
            national_express: true,
            regional: true,
            regional_express: true,
            suburban: true,
            subway: true,
            taxi: true,
            tram: true,
        };
        assert_eq!(marker_product(&all), Some(Product::RegionalExpress));
    }

    #[test]
    fn test_ferry_only_stop_has_no_marker() {
        let ferry = Products {
            ferry: true,
            taxi: true,
            ..Default::default()
        };
        assert_eq!(marker_product(&ferry), None);

        let stops = vec![
            stop_with("ferry", ferry),
            stop_with(
                "bus",
                Products {
                    bus: true,
                    ..Default::default()
                },
            ),
        ];
        let markers = stop_markers(&stops);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].stop_id, "bus");
        assert_eq!(markers[0].product, Product::Bus);
        assert_eq!(markers[0].position.latitude, 50.1);
    }
}
