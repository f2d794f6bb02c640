//! WebXml.com.cn weather service.
//!
//! Every operation answers with a flat `ArrayOfString`; the meaning of each
//! position is fixed by the service (for city weather: province, city, city
//! code, picture name, update time, then forecast lines).

use std::sync::Arc;

use ironsoap_client_core::{ClientConfig, HttpClient, SoapClient, SoapError};
use serde::{Deserialize, Serialize};
use tracing::instrument;

pub const DEFAULT_ENDPOINT: &str = "http://www.webxml.com.cn/WebServices/WeatherWebService.asmx";

pub const NAMESPACE: &str = "http://WebXml.com.cn/";

fn action(operation: &str) -> String {
    format!("{NAMESPACE}{operation}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "getSupportProvince")]
pub struct GetSupportProvince {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
}

impl Default for GetSupportProvince {
    fn default() -> Self {
        Self { xmlns: NAMESPACE }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "getSupportCity")]
pub struct GetSupportCity {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "byProvinceName")]
    pub province_name: String,
}

impl GetSupportCity {
    pub fn new(province_name: impl Into<String>) -> Self {
        Self {
            xmlns: NAMESPACE,
            province_name: province_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "getWeatherbyCityName")]
pub struct GetWeatherByCityName {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "theCityName")]
    pub city_name: String,
}

impl GetWeatherByCityName {
    pub fn new(city_name: impl Into<String>) -> Self {
        Self {
            xmlns: NAMESPACE,
            city_name: city_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "getWeatherbyCityNamePro")]
pub struct GetWeatherByCityNamePro {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "theCityName")]
    pub city_name: String,
    #[serde(rename = "theUserID")]
    pub user_id: String,
}

impl GetWeatherByCityNamePro {
    pub fn new(city_name: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            xmlns: NAMESPACE,
            city_name: city_name.into(),
            user_id: user_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArrayOfString {
    #[serde(rename = "string", default)]
    pub items: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GetSupportProvinceResponse {
    #[serde(rename = "getSupportProvinceResult", default)]
    result: ArrayOfString,
}

#[derive(Debug, Default, Deserialize)]
struct GetSupportCityResponse {
    #[serde(rename = "getSupportCityResult", default)]
    result: ArrayOfString,
}

#[derive(Debug, Default, Deserialize)]
struct GetWeatherByCityNameResponse {
    #[serde(rename = "getWeatherbyCityNameResult", default)]
    result: ArrayOfString,
}

#[derive(Debug, Default, Deserialize)]
struct GetWeatherByCityNameProResponse {
    #[serde(rename = "getWeatherbyCityNameProResult", default)]
    result: ArrayOfString,
}

/// The SOAP binding of the weather service.
pub struct WeatherWebServiceSoap<H> {
    client: Arc<SoapClient<H>>,
}

impl<H> Clone for WeatherWebServiceSoap<H> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<H: HttpClient> WeatherWebServiceSoap<H> {
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

    #[instrument(skip(self), err)]
    pub fn get_support_province(&self) -> Result<Vec<String>, SoapError> {
        let response: GetSupportProvinceResponse = self
            .client
            .call(&action("getSupportProvince"), &GetSupportProvince::default())?;
        Ok(response.result.items)
    }

    /// Cities of `province_name`, each as `name (code)`.
    #[instrument(skip(self), err)]
    pub fn get_support_city(&self, province_name: &str) -> Result<Vec<String>, SoapError> {
        let response: GetSupportCityResponse = self
            .client
            .call(&action("getSupportCity"), &GetSupportCity::new(province_name))?;
        Ok(response.result.items)
    }

    #[instrument(skip(self), err)]
    pub fn get_weather_by_city_name(&self, city_name: &str) -> Result<Vec<String>, SoapError> {
        let response: GetWeatherByCityNameResponse = self.client.call(
            &action("getWeatherbyCityName"),
            &GetWeatherByCityName::new(city_name),
        )?;
        Ok(response.result.items)
    }

    /// Like [`Self::get_weather_by_city_name`], for registered users.
    #[instrument(skip(self, user_id), err)]
    pub fn get_weather_by_city_name_pro(
        &self,
        city_name: &str,
        user_id: &str,
    ) -> Result<Vec<String>, SoapError> {
        let response: GetWeatherByCityNameProResponse = self.client.call(
            &action("getWeatherbyCityNamePro"),
            &GetWeatherByCityNamePro::new(city_name, user_id),
        )?;
        Ok(response.result.items)
    }
}
