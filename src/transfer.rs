//! JSON and CSV encodings of tours and tour logs for import/export.

use chrono::NaiveDateTime;
use csv::WriterBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Tour, TourDraft, TourLog, TourLogDraft, TransportType};
use crate::error::{invalid_format_error, serialization_error, Error};

pub const TOUR_COLUMNS: [&str; 8] = [
    "id",
    "name",
    "description",
    "distance_km",
    "estimated_time",
    "transport_type",
    "from_location",
    "to_location",
];

pub const TOUR_LOG_COLUMNS: [&str; 8] = [
    "id",
    "tour_id",
    "date_time",
    "comment",
    "difficulty",
    "total_distance_km",
    "total_time_hours",
    "rating",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Csv,
}

impl Format {
    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Csv => "text/csv",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TourRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub transport_type: Option<TransportType>,
    #[serde(default)]
    pub from_location: Option<String>,
    #[serde(default)]
    pub to_location: Option<String>,
}

impl From<&Tour> for TourRecord {
    fn from(tour: &Tour) -> Self {
        Self {
            id: tour.id,
            name: tour.name.clone(),
            description: tour.description.clone(),
            distance_km: tour.distance_km,
            estimated_time: tour.estimated_time.clone(),
            transport_type: tour.transport_type,
            from_location: tour.from_location.clone(),
            to_location: tour.to_location.clone(),
        }
    }
}

impl TourRecord {
    pub fn to_draft(&self) -> TourDraft {
        TourDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            distance_km: self.distance_km,
            estimated_time: self.estimated_time.clone(),
            transport_type: self.transport_type,
            from_location: self.from_location.clone(),
            to_location: self.to_location.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TourLogRecord {
    pub id: Uuid,
    pub tour_id: Uuid,
    #[serde(with = "date_time_format")]
    pub date_time: NaiveDateTime,
    #[serde(default)]
    pub comment: String,
    pub difficulty: f64,
    pub total_distance_km: f64,
    pub total_time_hours: f64,
    pub rating: f64,
}

impl From<&TourLog> for TourLogRecord {
    fn from(log: &TourLog) -> Self {
        Self {
            id: log.id,
            tour_id: log.tour_id,
            date_time: log.date_time,
            comment: log.comment.clone(),
            difficulty: log.difficulty,
            total_distance_km: log.total_distance_km,
            total_time_hours: log.total_time_hours,
            rating: log.rating,
        }
    }
}

impl TourLogRecord {
    pub fn to_draft(&self) -> TourLogDraft {
        TourLogDraft {
            tour_id: self.tour_id,
            date_time: self.date_time,
            comment: self.comment.clone(),
            difficulty: self.difficulty,
            total_distance_km: self.total_distance_km,
            total_time_hours: self.total_time_hours,
            rating: self.rating,
        }
    }
}

mod date_time_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(text.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}

fn encode<T: Serialize>(records: &[T], columns: &[&str], format: Format) -> Result<String, Error> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(records)?),
        Format::Csv => {
            // header written by hand so an empty export still has one
            let mut writer = WriterBuilder::new().has_headers(false).from_writer(vec![]);
            writer.write_record(columns)?;

            for record in records {
                writer.serialize(record)?;
            }

            let bytes = writer.into_inner().map_err(serialization_error)?;
            String::from_utf8(bytes).map_err(serialization_error)
        }
    }
}

fn decode<T: DeserializeOwned>(body: &str, format: Format) -> Result<Vec<T>, Error> {
    match format {
        Format::Json => serde_json::from_str(body).map_err(invalid_format_error),
        Format::Csv => {
            let mut reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::Headers)
                .from_reader(body.as_bytes());

            reader
                .deserialize()
                .collect::<Result<Vec<T>, csv::Error>>()
                .map_err(invalid_format_error)
        }
    }
}

pub fn encode_tours(tours: &[Tour], format: Format) -> Result<String, Error> {
    let records: Vec<TourRecord> = tours.iter().map(TourRecord::from).collect();
    encode(&records, &TOUR_COLUMNS, format)
}

pub fn decode_tours(body: &str, format: Format) -> Result<Vec<TourRecord>, Error> {
    decode(body, format)
}

pub fn encode_tour_logs(logs: &[TourLog], format: Format) -> Result<String, Error> {
    let records: Vec<TourLogRecord> = logs.iter().map(TourLogRecord::from).collect();
    encode(&records, &TOUR_LOG_COLUMNS, format)
}

pub fn decode_tour_logs(body: &str, format: Format) -> Result<Vec<TourLogRecord>, Error> {
    decode(body, format)
}
