//! Locations, pickup points, and time windows.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A time window, in minutes since midnight, for service at a node.
///
/// The vehicle must arrive no later than `due` and may arrive as early as
/// it likes (waiting until `ready` is allowed).
///
/// # Examples
///
/// ```
/// use pickup_routing::models::TimeWindow;
///
/// let tw = TimeWindow::new(480.0, 600.0).unwrap();
/// assert!(tw.contains(540.0));
/// assert!(!tw.contains(601.0));
/// assert_eq!(tw.waiting_time(470.0), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    ready: f64,
    due: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `ready > due` or either value is non-finite.
    pub fn new(ready: f64, due: f64) -> Option<Self> {
        if !ready.is_finite() || !due.is_finite() || ready > due {
            return None;
        }
        Some(Self { ready, due })
    }

    /// Earliest service start.
    pub fn ready(&self) -> f64 {
        self.ready
    }

    /// Latest allowable arrival.
    pub fn due(&self) -> f64 {
        self.due
    }

    /// Window length in minutes.
    pub fn width(&self) -> f64 {
        self.due - self.ready
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.ready && time <= self.due
    }

    /// Waiting time if arriving at `arrival`; zero when on time or late.
    pub fn waiting_time(&self, arrival: f64) -> f64 {
        if arrival < self.ready {
            self.ready - arrival
        } else {
            0.0
        }
    }

    /// Returns `true` if arriving at `arrival` misses this window.
    pub fn is_violated(&self, arrival: f64) -> bool {
        arrival > self.due
    }
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a coordinate pair without validation.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns `true` if both components are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// The fixed start and end location of every route (node 0).
///
/// # Examples
///
/// ```
/// use pickup_routing::models::Depot;
///
/// let depot = Depot::new(48.4504, -2.0448).unwrap().with_name("Castle");
/// assert_eq!(depot.name(), "Castle");
/// assert!(Depot::new(91.0, 0.0).is_err());
/// ```
///
/// Serialized flat as `{"lat", "lon", "name"}`; deserializing validates the
/// coordinates like [`Depot::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DepotRecord", into = "DepotRecord")]
pub struct Depot {
    location: GeoPoint,
    name: String,
}

impl Depot {
    /// Name used when the caller does not provide one.
    pub const DEFAULT_NAME: &'static str = "Depot";

    /// Creates a depot at the given coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self, ValidationError> {
        let location = GeoPoint::new(lat, lon);
        if !location.is_valid() {
            return Err(ValidationError::InvalidDepot { lat, lon });
        }
        Ok(Self {
            location,
            name: Self::DEFAULT_NAME.to_owned(),
        })
    }

    /// Sets a display name for depot stops.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Depot coordinates.
    pub fn location(&self) -> GeoPoint {
        self.location
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A pickup location with passenger demand and a requested arrival time.
///
/// Points are validated at construction: coordinates must be finite and in
/// range and at least one passenger must be waiting. The `arrival_time` is
/// kept verbatim; the model builder parses it and applies the configured
/// repair policy.
///
/// Deserializing goes through the same validation.
///
/// # Examples
///
/// ```
/// use pickup_routing::models::PickupPoint;
///
/// let p = PickupPoint::new(3, 48.46, -2.05, 2, "09:15", "Market square")
///     .unwrap()
///     .with_poi_type("amenity:bus_station");
/// assert_eq!(p.id(), 3);
/// assert_eq!(p.passengers(), 2);
/// assert_eq!(p.poi_type(), Some("amenity:bus_station"));
///
/// assert!(PickupPoint::new(4, 48.46, -2.05, 0, "09:15", "Empty").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PickupPointRecord")]
pub struct PickupPoint {
    id: u64,
    lat: f64,
    lon: f64,
    passengers: u32,
    arrival_time: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    poi_type: Option<String>,
}

impl PickupPoint {
    /// Creates a validated pickup point.
    pub fn new(
        id: u64,
        lat: f64,
        lon: f64,
        passengers: u32,
        arrival_time: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if !GeoPoint::new(lat, lon).is_valid() {
            return Err(ValidationError::InvalidCoordinates {
                point_id: id,
                lat,
                lon,
            });
        }
        if passengers == 0 {
            return Err(ValidationError::InvalidPassengers { point_id: id });
        }
        Ok(Self {
            id,
            lat,
            lon,
            passengers,
            arrival_time: arrival_time.into(),
            name: name.into(),
            poi_type: None,
        })
    }

    /// Sets the point-of-interest category.
    pub fn with_poi_type(mut self, poi_type: impl Into<String>) -> Self {
        self.poi_type = Some(poi_type.into());
        self
    }

    /// Caller-assigned identity.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Coordinates as a [`GeoPoint`].
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    /// Number of passengers waiting (always positive).
    pub fn passengers(&self) -> u32 {
        self.passengers
    }

    /// Requested arrival time as supplied, e.g. `"09:15"`.
    pub fn arrival_time(&self) -> &str {
        &self.arrival_time
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Point-of-interest category, if known.
    pub fn poi_type(&self) -> Option<&str> {
        self.poi_type.as_deref()
    }
}

#[derive(Serialize, Deserialize)]
struct DepotRecord {
    lat: f64,
    lon: f64,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<DepotRecord> for Depot {
    type Error = ValidationError;

    fn try_from(record: DepotRecord) -> Result<Self, Self::Error> {
        let depot = Self::new(record.lat, record.lon)?;
        Ok(match record.name {
            Some(name) => depot.with_name(name),
            None => depot,
        })
    }
}

impl From<Depot> for DepotRecord {
    fn from(depot: Depot) -> Self {
        Self {
            lat: depot.location.lat,
            lon: depot.location.lon,
            name: Some(depot.name),
        }
    }
}

/// Wire shape of a pickup point as produced by the ingestion side.
#[derive(Deserialize)]
struct PickupPointRecord {
    id: u64,
    lat: f64,
    lon: f64,
    passengers: u32,
    arrival_time: String,
    name: String,
    #[serde(default)]
    poi_type: Option<String>,
}

impl TryFrom<PickupPointRecord> for PickupPoint {
    type Error = ValidationError;

    fn try_from(record: PickupPointRecord) -> Result<Self, Self::Error> {
        let point = Self::new(
            record.id,
            record.lat,
            record.lon,
            record.passengers,
            record.arrival_time,
            record.name,
        )?;
        Ok(match record.poi_type {
            Some(poi_type) => point.with_poi_type(poi_type),
            None => point,
        })
    }
}
