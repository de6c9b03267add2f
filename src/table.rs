use geo::Point;
use log::debug;
use rand::Rng;

use crate::{utils::round_point, Resolver, Restaurant, Unresolved};

/// Neighbourhoods and streets of São Paulo with approximate `(lat, lng)`.
/// Earlier entries win when an address mentions several of them.
const SAO_PAULO: &[(&str, (f64, f64))] = &[
    // neighbourhoods
    ("pinheiros", (-23.5631, -46.6917)),
    ("vila madalena", (-23.5535, -46.6913)),
    ("jardins", (-23.5645, -46.6591)),
    ("itaim bibi", (-23.5848, -46.6796)),
    ("moema", (-23.5987, -46.6629)),
    ("higienópolis", (-23.5427, -46.6569)),
    ("consolação", (-23.5515, -46.6566)),
    ("paulista", (-23.5629, -46.6544)),
    ("centro", (-23.5475, -46.6361)),
    ("república", (-23.5437, -46.6426)),
    ("bela vista", (-23.5594, -46.6454)),
    ("liberdade", (-23.5584, -46.6303)),
    ("vila buarque", (-23.5402, -46.6494)),
    ("perdizes", (-23.5365, -46.6726)),
    ("santa cecília", (-23.5370, -46.6476)),
    ("brooklin", (-23.6032, -46.6805)),
    ("campo belo", (-23.6131, -46.6719)),
    ("vila olímpia", (-23.5972, -46.6856)),
    ("ibirapuera", (-23.5870, -46.6588)),
    ("barra funda", (-23.5254, -46.6668)),
    ("aclimação", (-23.5690, -46.6353)),
    // streets
    ("fradique coutinho", (-23.5614, -46.6875)),
    ("augusta", (-23.5515, -46.6534)),
    ("oscar freire", (-23.5651, -46.6692)),
    ("haddock lobo", (-23.5631, -46.6550)),
    ("joão moura", (-23.5571, -46.6927)),
    ("mourato coelho", (-23.5619, -46.6870)),
    ("aspicuelta", (-23.5598, -46.6918)),
    ("fidalga", (-23.5552, -46.6914)),
    ("lorena", (-23.5718, -46.6663)),
    ("bela cintra", (-23.5581, -46.6602)),
    ("padre joão manuel", (-23.5612, -46.6604)),
    ("artur de azevedo", (-23.5565, -46.6780)),
    ("fernão dias", (-23.5572, -46.6800)),
    ("mateus grou", (-23.5564, -46.6917)),
    ("harmonia", (-23.5521, -46.6924)),
    ("pedroso de morais", (-23.5631, -46.6882)),
    ("av. paulista", (-23.5614, -46.6556)),
    ("av. faria lima", (-23.5751, -46.6869)),
    ("alameda lorena", (-23.5681, -46.6668)),
    ("alameda campinas", (-23.5669, -46.6565)),
    ("rua da consolação", (-23.5558, -46.6545)),
    ("ipiranga", (-23.5377, -46.6406)),
];

pub const MATCH_JITTER: f64 = 0.002;
pub const CENTER_JITTER: f64 = 0.03;

/// Ordered list of lowercase place names, matched as substrings of an address.
#[derive(Clone, Debug)]
pub struct LocationTable {
    entries: Vec<(String, Point)>,
}

impl LocationTable {
    pub fn new<K: AsRef<str>>(entries: impl IntoIterator<Item = (K, (f64, f64))>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, (lat, lng))| (k.as_ref().to_lowercase(), Point::new(lat, lng)))
                .collect(),
        }
    }

    pub fn sao_paulo() -> Self {
        Self::new(SAO_PAULO.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry whose key appears in `address`, ignoring case.
    pub fn find(&self, address: &str) -> Option<(&str, Point)> {
        let address = address.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| address.contains(k.as_str()))
            .map(|(k, p)| (k.as_str(), *p))
    }
}

/// A city recognised by markers in the restaurant's `city` or `address`.
#[derive(Clone, Debug)]
pub struct Locality {
    pub name: String,
    pub city_markers: Vec<String>,
    pub address_markers: Vec<String>,
    pub center: Point,
}

impl Locality {
    pub fn new(
        name: &str,
        city_markers: &[&str],
        address_markers: &[&str],
        (lat, lng): (f64, f64),
    ) -> Self {
        let lower = |x: &[&str]| -> Vec<String> {
            x.iter().map(|x| x.to_lowercase()).collect()
        };
        Self {
            name: name.to_string(),
            city_markers: lower(city_markers),
            address_markers: lower(address_markers),
            center: Point::new(lat, lng),
        }
    }

    /// `sp` is a plain substring marker, so any city containing it (e.g.
    /// "Campinas - SP", "Espírito Santo") is treated as São Paulo too.
    pub fn sao_paulo() -> Self {
        Self::new(
            "São Paulo",
            &["são paulo", "sao paulo", "sp"],
            &[],
            (-23.5505, -46.6333),
        )
    }

    pub fn rio_de_janeiro() -> Self {
        Self::new(
            "Rio de Janeiro",
            &["rio"],
            &["barra da tijuca"],
            (-23.0002, -43.3656),
        )
    }

    pub fn matches(&self, city: &str, address: &str) -> bool {
        let city = city.to_lowercase();
        let address = address.to_lowercase();
        self.city_markers.iter().any(|x| city.contains(x.as_str()))
            || self.address_markers.iter().any(|x| address.contains(x.as_str()))
    }
}

/// Places restaurants of the primary city near a known neighbourhood or
/// street, with a bit of random spread so pins don't stack. Restaurants of a
/// secondary city get that city's fixed point.
pub struct TableResolver<R> {
    primary: Locality,
    secondary: Vec<Locality>,
    table: LocationTable,
    match_jitter: f64,
    center_jitter: f64,
    rng: R,
}

impl<R: Rng> TableResolver<R> {
    pub fn new(primary: Locality, table: LocationTable, rng: R) -> Self {
        Self {
            primary,
            secondary: Vec::new(),
            table,
            match_jitter: MATCH_JITTER,
            center_jitter: CENTER_JITTER,
            rng,
        }
    }

    pub fn sao_paulo(rng: R) -> Self {
        Self::new(Locality::sao_paulo(), LocationTable::sao_paulo(), rng)
            .with_secondary(Locality::rio_de_janeiro())
    }

    pub fn with_secondary(mut self, locality: Locality) -> Self {
        self.secondary.push(locality);
        self
    }

    pub fn with_jitter(mut self, match_jitter: f64, center_jitter: f64) -> Self {
        self.match_jitter = match_jitter.abs();
        self.center_jitter = center_jitter.abs();
        self
    }

    fn jitter(&mut self, base: Point, spread: f64) -> Point {
        let (lat, lng) = base.x_y();
        round_point(Point::new(
            lat + self.rng.gen_range(-spread..=spread),
            lng + self.rng.gen_range(-spread..=spread),
        ))
    }
}

impl<R: Rng> Resolver for TableResolver<R> {
    fn name(&self) -> &'static str {
        "location table"
    }

    fn resolve(&mut self, restaurant: &Restaurant) -> Result<Point, Unresolved> {
        if let Some(x) = restaurant.coordinates() {
            return Ok(x);
        }

        let city = restaurant.city();
        let address = restaurant.address();

        if !self.primary.matches(city, address) {
            let locality = self
                .secondary
                .iter()
                .find(|x| x.matches(city, address))
                .ok_or(Unresolved::NoLocality)?;
            debug!("{}: falling back to {}", restaurant.name(), locality.name);
            return Ok(locality.center);
        }

        let point = match self.table.find(address) {
            Some((key, base)) => {
                debug!("{}: matched '{key}'", restaurant.name());
                self.jitter(base, self.match_jitter)
            }
            None => {
                debug!("{}: no match, using {} center", restaurant.name(), self.primary.name);
                self.jitter(self.primary.center, self.center_jitter)
            }
        };

        Ok(point)
    }
}
