//! Cliente HTTP de la API
//!
//! Envuelve `reqwest` con las rutas del panel. Guarda el token de la
//! sesión tras el login y lo envía como Bearer en cada llamada.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::interaction::{delete_prompt, Confirm, SubmitGuard};
use super::ClientError;
use crate::dto::auth_dto::{CurrentUserResponse, LoginRequest, LoginResponse, LogoutResponse};
use crate::dto::brand_rule_dto::{BrandRuleResponse, SuggestionResponse};
use crate::dto::vehicle_dto::{DashboardResponse, VehicleRequest, VehicleResponse};
use crate::dto::ApiResponse;
use crate::services::vehicle_form::{FormMode, VehicleForm};

/// Sesión activa del cliente
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: CurrentUserResponse,
}

// Cuerpo de error que devuelve la API
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    redirect: Option<String>,
}

pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url,
            session: None,
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.send_json(Method::POST, "/api/auth/login", &request).await?;

        self.session = Some(Session {
            token: response.token.clone(),
            user: response.user.clone(),
        });
        Ok(response)
    }

    /// Cierra la sesión local aunque el servidor no responda
    pub async fn logout(&mut self) -> Result<LogoutResponse, ClientError> {
        let result = self.send(self.request(Method::POST, "/api/auth/logout")?).await;
        self.session = None;
        result
    }

    pub async fn me(&self) -> Result<CurrentUserResponse, ClientError> {
        self.get("/api/auth/me").await
    }

    /// Registros de hoy, o búsqueda en todo el historial si `q` no está en blanco
    pub async fn dashboard(&self, q: Option<&str>) -> Result<DashboardResponse, ClientError> {
        let mut request = self.request(Method::GET, "/api/vehicles")?;
        if let Some(term) = q.map(str::trim).filter(|t| !t.is_empty()) {
            request = request.query(&[("q", term)]);
        }
        self.send(request).await
    }

    pub async fn get_vehicle(&self, id: Uuid) -> Result<VehicleResponse, ClientError> {
        self.get(&format!("/api/vehicles/{}", id)).await
    }

    pub async fn create_vehicle(
        &self,
        request: &VehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, ClientError> {
        self.send_json(Method::POST, "/api/vehicles", request).await
    }

    pub async fn update_vehicle(
        &self,
        id: Uuid,
        request: &VehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, ClientError> {
        self.send_json(Method::PUT, &format!("/api/vehicles/{}", id), request)
            .await
    }

    pub async fn delete_vehicle(&self, id: Uuid) -> Result<ApiResponse<()>, ClientError> {
        self.send(self.request(Method::DELETE, &format!("/api/vehicles/{}", id))?)
            .await
    }

    pub async fn suggestion(&self, brand: &str, sub_brand: &str) -> Result<SuggestionResponse, ClientError> {
        let request = self
            .request(Method::GET, "/api/vehicles/suggestion")?
            .query(&[("brand", brand), ("sub_brand", sub_brand)]);
        self.send(request).await
    }

    pub async fn brand_rules(&self) -> Result<Vec<BrandRuleResponse>, ClientError> {
        self.get("/api/brand-rules").await
    }

    /// Formulario de alta con las reglas del usuario ya cargadas
    pub async fn open_create_form(&self, current_year: i32) -> Result<VehicleForm, ClientError> {
        let user_id = self.session.as_ref().ok_or(ClientError::NotAuthenticated)?.user.id;
        let rules = self
            .brand_rules()
            .await?
            .into_iter()
            .map(|rule| rule.into_rule(user_id))
            .collect();

        let mut form = VehicleForm::create(current_year);
        form.load_rules(rules);
        Ok(form)
    }

    pub async fn open_edit_form(&self, id: Uuid) -> Result<VehicleForm, ClientError> {
        let vehicle = self.get_vehicle(id).await?;
        Ok(VehicleForm::edit(&vehicle))
    }

    /// Envía el formulario; un segundo envío mientras el primero sigue
    /// en curso devuelve `ClientError::Busy`
    pub async fn submit(
        &self,
        form: &VehicleForm,
        guard: &SubmitGuard,
    ) -> Result<ApiResponse<VehicleResponse>, ClientError> {
        let _ticket = guard.try_begin()?;
        let request = form.to_request();

        match form.mode() {
            FormMode::Create => self.create_vehicle(&request).await,
            FormMode::Edit { vehicle_id } => self.update_vehicle(vehicle_id, &request).await,
        }
    }

    /// Pide confirmación y borra; `Ok(false)` si el usuario cancela
    pub async fn delete_with_confirmation<C>(
        &self,
        vehicle: &VehicleResponse,
        confirmer: &C,
    ) -> Result<bool, ClientError>
    where
        C: Confirm + ?Sized,
    {
        let prompt = delete_prompt(&vehicle.brand, &vehicle.sub_brand);
        if !confirmer.confirm(&prompt) {
            debug!("Borrado cancelado para {}", vehicle.id);
            return Ok(false);
        }

        self.delete_vehicle(vehicle.id).await?;
        Ok(true)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let builder = self.client.request(method, url);
        Ok(match &self.session {
            Some(session) => builder.bearer_auth(&session.token),
            None => builder,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(self.request(Method::GET, path)?).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(method, path)?.json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        parse_response(response).await
    }
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.json::<ErrorBody>().await.unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        message: body.message.unwrap_or_else(|| status.to_string()),
        redirect: body.redirect,
    })
}
