use std::time::Duration;

use chrono::{Datelike, Local, Utc};
use reqwest::Url;
use tokio::net::TcpListener;

use verifi_check::client::{dashboard_url, search_channel, ApiClient, ClientError, SubmitGuard};
use verifi_check::config::EnvironmentConfig;
use verifi_check::controllers::AuthController;
use verifi_check::create_app;
use verifi_check::models::TestType;
use verifi_check::repositories::InMemoryStore;
use verifi_check::services::SuggestionSource;
use verifi_check::state::AppState;

const EMAIL: &str = "inspector@verificentro.mx";
const PASSWORD: &str = "secreto123";

async fn spawn_app() -> (String, InMemoryStore) {
    let store = InMemoryStore::new();
    let config = EnvironmentConfig {
        bcrypt_cost: 4,
        ..EnvironmentConfig::default()
    };
    let state = AppState::in_memory(store.clone(), config);
    AuthController::new(&state)
        .ensure_account(EMAIL, PASSWORD)
        .await
        .unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_app(state)).await.unwrap();
    });

    (format!("http://{}", addr), store)
}

async fn logged_in_client() -> (ApiClient, InMemoryStore) {
    let (base_url, store) = spawn_app().await;
    let mut client = ApiClient::new(&base_url).unwrap();
    client.login(EMAIL, PASSWORD).await.unwrap();
    (client, store)
}

#[tokio::test]
async fn test_requests_without_session_are_unauthorized() {
    let (base_url, _) = spawn_app().await;
    let client = ApiClient::new(&base_url).unwrap();

    let err = client.dashboard(None).await.unwrap_err();
    assert!(err.is_unauthorized());
    match err {
        ClientError::Api { redirect, .. } => assert_eq!(redirect.as_deref(), Some("/login")),
        other => panic!("unexpected error: {other}"),
    }

    let err = client.open_create_form(2026).await.unwrap_err();
    assert!(matches!(err, ClientError::NotAuthenticated));
}

#[tokio::test]
async fn test_login_and_logout() {
    let (mut client, _) = logged_in_client().await;
    assert_eq!(client.me().await.unwrap().display_name, "inspector");

    let logout = client.logout().await.unwrap();
    assert_eq!(logout.redirect, "/login");
    assert!(client.session().is_none());
    assert!(client.me().await.unwrap_err().is_unauthorized());
}

#[tokio::test]
async fn test_create_form_flow_with_saved_rule() {
    let (client, _) = logged_in_client().await;
    let guard = SubmitGuard::new();
    let year = Local::now().year();

    let mut form = client.open_create_form(year).await.unwrap();
    form.set_brand("Renault");
    form.set_sub_brand("Kwid");
    assert_eq!(form.test_type(), TestType::Static);

    form.set_test_type(TestType::Dynamic);
    form.set_save_as_rule(true);
    let created = client.submit(&form, &guard).await.unwrap();
    assert_eq!(created.message.as_deref(), Some("Vehículo creado exitosamente"));
    assert!(!guard.is_loading());

    // El formulario siguiente ya conoce la regla guardada
    let mut form = client.open_create_form(year).await.unwrap();
    form.set_brand("renault");
    form.set_sub_brand("Kwid");
    assert_eq!(form.test_type(), TestType::Dynamic);

    let suggestion = client.suggestion("Renault", "Kwid").await.unwrap();
    assert_eq!(suggestion.source, Some(SuggestionSource::UserRule));
}

#[tokio::test]
async fn test_edit_form_updates_without_rules() {
    let (client, _) = logged_in_client().await;
    let guard = SubmitGuard::new();

    let mut form = client.open_create_form(2020).await.unwrap();
    form.set_brand("Toyota");
    form.set_sub_brand("Yaris");
    let created = client.submit(&form, &guard).await.unwrap().data.unwrap();
    assert_eq!(created.test_type, TestType::Dynamic);

    let mut form = client.open_edit_form(created.id).await.unwrap();
    assert!(form.is_editing());
    form.set_sub_brand("Yaris Sedán");
    form.set_test_type(TestType::Static);
    let updated = client.submit(&form, &guard).await.unwrap();
    assert_eq!(updated.message.as_deref(), Some("Vehículo actualizado exitosamente"));

    let updated = updated.data.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(client.brand_rules().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_busy_guard_blocks_submit() {
    let (client, store) = logged_in_client().await;
    let guard = SubmitGuard::new();

    let mut form = client.open_create_form(2020).await.unwrap();
    form.set_brand("Mazda");
    form.set_sub_brand("3");

    let _in_flight = guard.try_begin().unwrap();
    let err = client.submit(&form, &guard).await.unwrap_err();
    assert!(matches!(err, ClientError::Busy));
    assert_eq!(store.vehicle_count().await, 0);
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let (client, store) = logged_in_client().await;
    let guard = SubmitGuard::new();

    let mut form = client.open_create_form(2020).await.unwrap();
    form.set_brand("Chevrolet");
    form.set_sub_brand("Beat");
    let vehicle = client.submit(&form, &guard).await.unwrap().data.unwrap();

    let declined = client
        .delete_with_confirmation(&vehicle, &|prompt: &str| {
            assert_eq!(
                prompt,
                "¿Estás seguro de que deseas eliminar el registro de Chevrolet Beat?"
            );
            false
        })
        .await
        .unwrap();
    assert!(!declined);
    assert_eq!(store.vehicle_count().await, 1);

    let accepted = client
        .delete_with_confirmation(&vehicle, &|_: &str| true)
        .await
        .unwrap();
    assert!(accepted);
    assert_eq!(store.vehicle_count().await, 0);
}

#[tokio::test]
async fn test_search_and_server_messages() {
    let (client, store) = logged_in_client().await;
    let guard = SubmitGuard::new();

    let mut form = client.open_create_form(2020).await.unwrap();
    form.set_brand("Volkswagen");
    form.set_sub_brand("Vento");
    client.submit(&form, &guard).await.unwrap();

    let today = client.dashboard(Some("   ")).await.unwrap();
    assert_eq!(today.title, "Registros de Hoy");
    assert_eq!(today.total, 1);

    let found = client.dashboard(Some("vento")).await.unwrap();
    assert_eq!(found.query.as_deref(), Some("vento"));
    assert_eq!(found.vehicles[0].vehicle.brand, "Volkswagen");

    store.fail_vehicle_writes(true);
    let err = client.submit(&form, &guard).await.unwrap_err();
    match err {
        ClientError::Api { status, message, .. } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Error al guardar vehículo");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!guard.is_loading());
}

/// Término estable -> URL de la página -> consulta al servidor
#[tokio::test]
async fn test_settled_search_drives_dashboard() {
    let (base_url, store) = spawn_app().await;
    let mut client = ApiClient::new(&base_url).unwrap();
    client.login(EMAIL, PASSWORD).await.unwrap();
    let guard = SubmitGuard::new();

    let mut form = client.open_create_form(2018).await.unwrap();
    form.set_brand("Chevrolet");
    form.set_sub_brand("Beat");
    let created = client.submit(&form, &guard).await.unwrap().data.unwrap();
    assert!(store.backdate(created.id, Utc::now() - chrono::Duration::days(3)).await);

    let page = Url::parse(&format!("{}/", base_url)).unwrap();
    let (debouncer, mut settled) = search_channel(Duration::from_millis(50));

    let typing = async {
        for term in ["b", "be", "bea", "  BEAT "] {
            debouncer.push(term);
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    };
    let (_, term) = tokio::join!(typing, settled.next());
    let term = term.unwrap();
    assert_eq!(term, "BEAT");

    let url = dashboard_url(&page, Some(&term));
    let q = url
        .query_pairs()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned());
    assert_eq!(q.as_deref(), Some("BEAT"));

    let found = client.dashboard(q.as_deref()).await.unwrap();
    assert_eq!(found.title, "Buscando \"BEAT\"");
    assert_eq!(found.total, 1);
    assert_eq!(found.vehicles[0].vehicle.id, created.id);

    // Borrar el campo quita `q` y vuelve a los registros de hoy
    debouncer.push("   ");
    let cleared = settled.next().await.unwrap();
    let url = dashboard_url(&url, Some(&cleared));
    assert_eq!(url.query(), None);

    let today = client.dashboard(None).await.unwrap();
    assert_eq!(today.title, "Registros de Hoy");
    assert_eq!(today.total, 0);
}
