use std::time::Duration;

use futures_util::SinkExt;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast::Receiver;
use tokio_tungstenite::tungstenite::Message;

use storefront_client::{
    auth::Identity,
    config::ClientConfig,
    gateway::ApiGateway,
    models::OrderStatus,
    realtime::{RealtimeChannel, RealtimeEvent},
    services::orders::OrderViewModel,
};

// Push path end to end: frames come off the wire, malformed ones are
// dropped, and the surviving events merge into the order cache by the
// admin-only / replace-by-id rules.
#[tokio::test]
async fn pushed_events_merge_into_an_admin_cache() -> anyhow::Result<()> {
    let url = spawn_ws_stub().await?;
    let channel = RealtimeChannel::connect(&url).await?;
    let mut rx = channel.subscribe();

    let mut vm = empty_view_model()?;
    let admin = Identity::admin("u-admin");

    for _ in 0..3 {
        let event = next_event(&mut rx).await?;
        vm.handle_event(event, &admin);
    }

    assert_eq!(vm.orders().len(), 1, "unknown ids never create rows");
    let order = vm.find("B2").expect("pushed order cached");
    assert_eq!(order.status, OrderStatus::Shipped);

    channel.close();
    Ok(())
}

#[tokio::test]
async fn customer_sessions_ignore_new_order_pushes() -> anyhow::Result<()> {
    let url = spawn_ws_stub().await?;
    let channel = RealtimeChannel::connect(&url).await?;
    let mut rx = channel.subscribe();

    let mut vm = empty_view_model()?;
    let customer = Identity::customer("u-1");

    for _ in 0..3 {
        let event = next_event(&mut rx).await?;
        vm.handle_event(event, &customer);
    }

    assert!(vm.orders().is_empty());

    channel.close();
    Ok(())
}

async fn next_event(rx: &mut Receiver<RealtimeEvent>) -> anyhow::Result<RealtimeEvent> {
    Ok(tokio::time::timeout(Duration::from_secs(5), rx.recv()).await??)
}

fn empty_view_model() -> anyhow::Result<OrderViewModel> {
    let config = ClientConfig {
        api_base_url: "http://127.0.0.1:0".into(),
        realtime_url: String::new(),
        token: None,
        request_timeout: Duration::from_secs(1),
    };
    Ok(OrderViewModel::new(ApiGateway::new(&config)?))
}

fn order_frame(event: &str, id: &str, status: &str) -> String {
    json!({
        "event": event,
        "data": {
            "id": id,
            "status": status,
            "createdAt": "2026-08-01T10:00:00Z",
            "orderItems": [],
            "itemsPrice": 500,
            "taxPrice": 50,
            "shippingPrice": 40,
            "totalPrice": 590
        }
    })
    .to_string()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storefront_client=debug".into()),
        )
        .try_init();
}

/// One-shot WebSocket stub: accepts a single connection, pushes a fixed
/// frame sequence (including one malformed frame), then closes.
async fn spawn_ws_stub() -> anyhow::Result<String> {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

        let frames = vec![
            "this is not json".to_string(),
            order_frame("new-order", "B2", "Pending"),
            order_frame("order-status-updated", "B2", "Shipped"),
            order_frame("order-status-updated", "ghost", "Shipped"),
        ];
        for frame in frames {
            ws.send(Message::Text(frame)).await.unwrap();
        }
        ws.send(Message::Close(None)).await.ok();
    });

    Ok(format!("ws://{addr}"))
}
