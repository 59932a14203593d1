use crate::domain::model::Product;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Bus,
    Ferry,
    Suburban,
    Subway,
    Taxi,
    Train,
    Tram,
    Unknown,
}

impl IconKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconKind::Bus => "bus",
            IconKind::Ferry => "ferry",
            IconKind::Suburban => "suburban",
            IconKind::Subway => "subway",
            IconKind::Taxi => "taxi",
            IconKind::Train => "train",
            IconKind::Tram => "tram",
            IconKind::Unknown => "unknown",
        }
    }

    /// Short label as printed on German signage.
    pub fn label(&self) -> &'static str {
        match self {
            IconKind::Bus => "Bus",
            IconKind::Ferry => "Fähre",
            IconKind::Suburban => "S",
            IconKind::Subway => "U",
            IconKind::Taxi => "Taxi",
            IconKind::Train => "Zug",
            IconKind::Tram => "Tram",
            IconKind::Unknown => "?",
        }
    }
}

impl From<Product> for IconKind {
    fn from(product: Product) -> Self {
        match product {
            Product::National
            | Product::NationalExpress
            | Product::Regional
            | Product::RegionalExpress => IconKind::Train,
            Product::Bus => IconKind::Bus,
            Product::Ferry => IconKind::Ferry,
            Product::Suburban => IconKind::Suburban,
            Product::Subway => IconKind::Subway,
            Product::Taxi => IconKind::Taxi,
            Product::Tram => IconKind::Tram,
            Product::Unknown => IconKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProductIcon {
    pub kind: IconKind,
    pub circled: bool,
}

impl ProductIcon {
    pub fn new(product: Product) -> Self {
        Self {
            kind: product.into(),
            circled: false,
        }
    }

    /// Map markers draw their icon inside a circle.
    pub fn circled(product: Product) -> Self {
        Self {
            kind: product.into(),
            circled: true,
        }
    }

    pub fn class_names(&self) -> String {
        let mut classes = vec!["icon", self.kind.as_str()];
        if self.circled {
            classes.push("circled");
        }
        classes.join(" ")
    }
}

impl fmt::Display for ProductIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.circled {
            write!(f, "({})", self.kind.label())
        } else {
            write!(f, "[{}]", self.kind.label())
        }
    }
}
