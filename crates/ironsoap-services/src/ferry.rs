//! Washington State Ferries schedule service (`WSF Schedule`).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ironsoap_client_core::{ClientConfig, HttpClient, SoapClient, SoapError};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::xsd;

pub const DEFAULT_ENDPOINT: &str = "http://b2b.wsdot.wa.gov/ferries/schedule/Default.asmx";

pub const NAMESPACE: &str = "http://www.wsdot.wa.gov/ferries/schedule/";

fn action(operation: &str) -> String {
    format!("{NAMESPACE}{operation}")
}

// Requests

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripDateMsg {
    #[serde(rename = "TripDate", with = "xsd::date_time")]
    pub trip_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMsg {
    #[serde(rename = "TripDate", with = "xsd::date_time")]
    pub trip_date: DateTime<Utc>,
    #[serde(rename = "RouteID")]
    pub route_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "GetActiveScheduledSeasons")]
pub struct GetActiveScheduledSeasons {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
}

impl Default for GetActiveScheduledSeasons {
    fn default() -> Self {
        Self { xmlns: NAMESPACE }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "GetAllRoutes")]
pub struct GetAllRoutes {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    pub request: TripDateMsg,
}

impl GetAllRoutes {
    pub fn new(trip_date: DateTime<Utc>) -> Self {
        Self {
            xmlns: NAMESPACE,
            request: TripDateMsg { trip_date },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "GetAllRouteDetails")]
pub struct GetAllRouteDetails {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    pub request: TripDateMsg,
}

impl GetAllRouteDetails {
    pub fn new(trip_date: DateTime<Utc>) -> Self {
        Self {
            xmlns: NAMESPACE,
            request: TripDateMsg { trip_date },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "GetRouteDetail")]
pub struct GetRouteDetail {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    pub request: RouteMsg,
}

impl GetRouteDetail {
    pub fn new(trip_date: DateTime<Utc>, route_id: i32) -> Self {
        Self {
            xmlns: NAMESPACE,
            request: RouteMsg {
                trip_date,
                route_id,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "GetValidDateRange")]
pub struct GetValidDateRange {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
}

impl Default for GetValidDateRange {
    fn default() -> Self {
        Self { xmlns: NAMESPACE }
    }
}

// Responses

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchedBriefResponse {
    #[serde(rename = "ScheduleID")]
    pub schedule_id: i32,
    #[serde(rename = "ScheduleName")]
    pub schedule_name: String,
    #[serde(rename = "ScheduleSeason")]
    pub schedule_season: Option<Season>,
    #[serde(rename = "SchedulePDFUrl")]
    pub schedule_pdf_url: String,
    #[serde(rename = "ScheduleStart", deserialize_with = "xsd::option_date_time::deserialize")]
    pub schedule_start: Option<DateTime<Utc>>,
    #[serde(rename = "ScheduleEnd", deserialize_with = "xsd::option_date_time::deserialize")]
    pub schedule_end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArrayOfSchedBriefResponse {
    #[serde(rename = "SchedBriefResponse", default)]
    pub seasons: Vec<SchedBriefResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouteBriefResponse {
    #[serde(rename = "RouteID")]
    pub route_id: i32,
    #[serde(rename = "RouteAbbrev")]
    pub route_abbrev: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "RegionID")]
    pub region_id: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArrayOfRouteBriefResponse {
    #[serde(rename = "RouteBriefResponse", default)]
    pub routes: Vec<RouteBriefResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouteResponse {
    #[serde(rename = "RouteID")]
    pub route_id: i32,
    #[serde(rename = "RouteAbbrev")]
    pub route_abbrev: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "RegionID")]
    pub region_id: i32,
    #[serde(rename = "VesselWatchID")]
    pub vessel_watch_id: i32,
    #[serde(rename = "ReservationFlag")]
    pub reservation_flag: bool,
    #[serde(rename = "InternationalFlag")]
    pub international_flag: bool,
    #[serde(rename = "PassengerOnlyFlag")]
    pub passenger_only_flag: bool,
    #[serde(rename = "CrossingTime")]
    pub crossing_time: String,
    #[serde(rename = "AdaNotes")]
    pub ada_notes: String,
    #[serde(rename = "GeneralRouteNotes")]
    pub general_route_notes: String,
    #[serde(rename = "SeasonalRouteNotes")]
    pub seasonal_route_notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArrayOfRouteResponse {
    #[serde(rename = "RouteResponse", default)]
    pub routes: Vec<RouteResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidDateRangeResponse {
    #[serde(rename = "DateFrom", deserialize_with = "xsd::option_date_time::deserialize")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(rename = "DateThru", deserialize_with = "xsd::option_date_time::deserialize")]
    pub date_thru: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
struct GetActiveScheduledSeasonsResponse {
    #[serde(rename = "GetActiveScheduledSeasonsResult", default)]
    result: ArrayOfSchedBriefResponse,
}

#[derive(Debug, Default, Deserialize)]
struct GetAllRoutesResponse {
    #[serde(rename = "GetAllRoutesResult", default)]
    result: ArrayOfRouteBriefResponse,
}

#[derive(Debug, Default, Deserialize)]
struct GetAllRouteDetailsResponse {
    #[serde(rename = "GetAllRouteDetailsResult", default)]
    result: ArrayOfRouteResponse,
}

#[derive(Debug, Default, Deserialize)]
struct GetRouteDetailResponse {
    #[serde(rename = "GetRouteDetailResult", default)]
    result: Option<RouteResponse>,
}

#[derive(Debug, Default, Deserialize)]
struct GetValidDateRangeResponse {
    #[serde(rename = "GetValidDateRangeResult", default)]
    result: ValidDateRangeResponse,
}

/// The SOAP binding of the schedule service.
pub struct ScheduleSoap<H> {
    client: Arc<SoapClient<H>>,
}

impl<H> Clone for ScheduleSoap<H> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<H: HttpClient> ScheduleSoap<H> {
    /// Falls back to [`DEFAULT_ENDPOINT`] when `config` names no endpoint.
    pub fn new(config: ClientConfig, http: H) -> Result<Self, SoapError> {
        let client = crate::shared_client(config, DEFAULT_ENDPOINT, http)?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: Arc<SoapClient<H>>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<SoapClient<H>> {
        &self.client
    }

    /// Scheduled sailing seasons currently active or available.
    #[instrument(skip(self), err)]
    pub fn get_active_scheduled_seasons(&self) -> Result<ArrayOfSchedBriefResponse, SoapError> {
        let response: GetActiveScheduledSeasonsResponse = self.client.call(
            &action("GetActiveScheduledSeasons"),
            &GetActiveScheduledSeasons::default(),
        )?;
        Ok(response.result)
    }

    /// Routes sailing on `trip_date`.
    #[instrument(skip(self), err)]
    pub fn get_all_routes(&self, trip_date: DateTime<Utc>) -> Result<ArrayOfRouteBriefResponse, SoapError> {
        let response: GetAllRoutesResponse = self
            .client
            .call(&action("GetAllRoutes"), &GetAllRoutes::new(trip_date))?;
        Ok(response.result)
    }

    /// Every route sailing on `trip_date`, with notes and flags.
    #[instrument(skip(self), err)]
    pub fn get_all_route_details(&self, trip_date: DateTime<Utc>) -> Result<ArrayOfRouteResponse, SoapError> {
        let response: GetAllRouteDetailsResponse = self
            .client
            .call(&action("GetAllRouteDetails"), &GetAllRouteDetails::new(trip_date))?;
        Ok(response.result)
    }

    /// `None` when the service knows no such route on that date.
    #[instrument(skip(self), err)]
    pub fn get_route_detail(
        &self,
        trip_date: DateTime<Utc>,
        route_id: i32,
    ) -> Result<Option<RouteResponse>, SoapError> {
        let response: GetRouteDetailResponse = self
            .client
            .call(&action("GetRouteDetail"), &GetRouteDetail::new(trip_date, route_id))?;
        Ok(response.result)
    }

    /// The span of dates schedule data can be requested for.
    #[instrument(skip(self), err)]
    pub fn get_valid_date_range(&self) -> Result<ValidDateRangeResponse, SoapError> {
        let response: GetValidDateRangeResponse = self
            .client
            .call(&action("GetValidDateRange"), &GetValidDateRange::default())?;
        Ok(response.result)
    }
}

/// The HTTP POST binding. It has no published endpoint, so one must be
/// configured; requests are empty envelopes sent without `SOAPAction`, and
/// the answer's root is the result array itself.
pub struct ScheduleHttpPost<H> {
    client: Arc<SoapClient<H>>,
}

impl<H: HttpClient> ScheduleHttpPost<H> {
    pub fn new(config: ClientConfig, http: H) -> Result<Self, SoapError> {
        let client = SoapClient::new(config, http)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    pub fn client(&self) -> &Arc<SoapClient<H>> {
        &self.client
    }

    #[instrument(skip(self), err)]
    pub fn get_active_scheduled_seasons(&self) -> Result<ArrayOfSchedBriefResponse, SoapError> {
        self.client.call_empty("")
    }

    #[instrument(skip(self), err)]
    pub fn get_valid_date_range(&self) -> Result<ValidDateRangeResponse, SoapError> {
        self.client.call_empty("")
    }
}
