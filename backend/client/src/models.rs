use bills::BillRecord;
use serde::Deserialize;

pub const DEFAULT_PROXY_URL: &str = "http://localhost:3001/api";
pub const NO_SPONSOR: &str = "No sponsor listed";

/// The slice of a bill the terminal views need.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BillView {
    pub bill_no: String,
    pub bill_year: String,
    pub bill_type: String,
    pub status: String,
    pub short_title_en: String,
    pub short_title_ga: String,
    pub long_title_en: String,
    pub long_title_ga: String,
    pub sponsors: Vec<SponsorShell>,
}

#[derive(Deserialize, Debug)]
pub struct SponsorShell {
    pub sponsor: Sponsor,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Sponsor {
    pub by: Option<ShowAs>,
    #[serde(rename = "as")]
    pub as_: Option<ShowAs>,
    pub is_primary: bool,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ShowAs {
    pub show_as: Option<String>,
}

impl BillView {
    pub fn from_record(record: &BillRecord) -> Self {
        record
            .bill()
            .and_then(|bill| serde_json::from_value(bill.clone()).ok())
            .unwrap_or_default()
    }

    pub fn key(&self) -> String {
        format!("{}/{}", self.bill_no, self.bill_year)
    }
}
