use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};

use loyalty_qr::{gateway_client, GatewayNotifier, QrMetrics, QrService, RenderSettings};

struct GatewayBehavior {
    notifications: Arc<Mutex<Vec<serde_json::Value>>>,
    notify_status: StatusCode,
    health_status: &'static str,
}

async fn notification(
    behavior: web::Data<GatewayBehavior>,
    body: web::Json<serde_json::Value>,
) -> HttpResponse {
    behavior.notifications.lock().unwrap().push(body.into_inner());
    HttpResponse::build(behavior.notify_status).json(serde_json::json!({ "ok": true }))
}

async fn health(behavior: web::Data<GatewayBehavior>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": behavior.health_status }))
}

/// In-process stand-in for the loyalty gateway.
pub struct FakeGateway {
    pub addr: SocketAddr,
    pub notifications: Arc<Mutex<Vec<serde_json::Value>>>,
    handle: ServerHandle,
}

impl FakeGateway {
    pub async fn start(notify_status: u16, health_status: &'static str) -> Self {
        let notifications = Arc::new(Mutex::new(Vec::new()));
        let behavior = web::Data::new(GatewayBehavior {
            notifications: notifications.clone(),
            notify_status: StatusCode::from_u16(notify_status).unwrap(),
            health_status,
        });

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(behavior.clone())
                .route("/api/qr/notification", web::post().to(notification))
                .route("/actuator/health", web::get().to(health))
        })
        .workers(1)
        .listen(listener)
        .unwrap()
        .run();
        let handle = server.handle();
        actix_rt::spawn(server);

        Self {
            addr,
            notifications,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn notifier(&self) -> GatewayNotifier {
        GatewayNotifier::new(gateway_client().unwrap(), self.url())
    }

    pub fn received(&self) -> Vec<serde_json::Value> {
        self.notifications.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

pub fn service_with(notifier: GatewayNotifier) -> (QrService, Arc<QrMetrics>) {
    let metrics = Arc::new(QrMetrics::register(&prometheus::Registry::new()).unwrap());
    let service = QrService::new(RenderSettings::default(), metrics.clone(), notifier);
    (service, metrics)
}

/// A notifier pointed at a port nothing listens on.
pub fn dead_notifier() -> GatewayNotifier {
    GatewayNotifier::new(gateway_client().unwrap(), "http://127.0.0.1:1")
}
