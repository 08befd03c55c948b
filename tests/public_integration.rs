use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coincheck_api_client::error::CoincheckError;
use coincheck_api_client::rest::RestClient;
use coincheck_api_client::rest::public::TradesRequest;
use coincheck_api_client::types::{Pair, TradeSide};

fn build_public_client(server: &MockServer) -> RestClient {
    RestClient::builder().base_url(server.uri()).build()
}

#[tokio::test]
async fn test_get_ticker() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "last": 27390,
        "bid": 26900,
        "ask": 27390,
        "high": 27659,
        "low": 26400,
        "volume": "50.29627103",
        "timestamp": 1423377841
    });

    Mock::given(method("GET"))
        .and(path("/ticker"))
        .and(query_param_is_missing("pair"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let ticker = client.get_ticker(None).await.unwrap();

    assert_eq!(ticker.last, 27390.0);
    assert_eq!(ticker.bid, 26900.0);
    assert_eq!(ticker.ask, 27390.0);
    assert_eq!(ticker.high, 27659.0);
    assert_eq!(ticker.low, 26400.0);
    assert_eq!(ticker.volume, 50.29627103);
    assert_eq!(ticker.timestamp.unix_timestamp(), 1423377841);
}

#[tokio::test]
async fn test_get_ticker_for_pair() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "last": "0.03", "bid": "0.029", "ask": "0.031",
        "high": "0.035", "low": "0.028", "volume": "1200",
        "timestamp": 1700000000
    });

    Mock::given(method("GET"))
        .and(path("/ticker"))
        .and(query_param("pair", "eth_btc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let ticker = client.get_ticker(Some(Pair::EthBtc)).await.unwrap();
    assert_eq!(ticker.bid, 0.029);
    assert_eq!(ticker.volume, 1200.0);
}

#[tokio::test]
async fn test_get_trades_with_params() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "success": true,
        "pagination": {"limit": 2, "order": "desc"},
        "data": [
            {"id": 82, "amount": "0.28391", "rate": 35400, "pair": "btc_jpy", "order_type": "sell", "created_at": "2015-01-10T05:55:38.000Z"},
            {"id": 81, "amount": "0.1", "rate": "35500.0", "pair": "btc_jpy", "order_type": "buy", "created_at": "2015-01-09T15:25:13.000Z"}
        ]
    });

    Mock::given(method("GET"))
        .and(path("/trades"))
        .and(query_param("pair", "btc_jpy"))
        .and(query_param("offset", "20"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let request = TradesRequest::new(Pair::BtcJpy).offset(20).limit(2);
    let trades = client.get_trades(&request).await.unwrap();

    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].id, 82);
    assert_eq!(trades[0].amount, 0.28391);
    assert_eq!(trades[0].order_type, TradeSide::Sell);
    assert_eq!(trades[1].rate, 35500.0);
}

#[tokio::test]
async fn test_get_order_book() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "asks": [[27330, "2.25"], [27340, "0.45"]],
        "bids": [[27240, "1.1543"], [26800, "1.2"]]
    });

    Mock::given(method("GET"))
        .and(path("/order_books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let book = client.get_order_book().await.unwrap();

    assert_eq!(book.asks.len(), 2);
    assert_eq!(book.asks[0].rate, 27330.0);
    assert_eq!(book.asks[0].amount, 2.25);
    assert_eq!(book.bids[1].amount, 1.2);
    assert_eq!(book.spread(), Some(90.0));
}

#[tokio::test]
async fn test_get_rate_uses_pair_in_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rate/btc_jpy"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"rate": "60000"})),
        )
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let rate = client.get_rate(Pair::BtcJpy).await.unwrap();
    assert_eq!(rate, 60000.0);
}

#[tokio::test]
async fn test_calculate_rate_by_amount() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "success": true,
        "rate": 60000,
        "amount": 0.1,
        "price": 6000
    });

    Mock::given(method("GET"))
        .and(path("/exchange/orders/rate"))
        .and(query_param("order_type", "buy"))
        .and(query_param("pair", "btc_jpy"))
        .and(query_param("amount", "0.1"))
        .and(query_param_is_missing("price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let calculated = client
        .calculate_rate_by_amount(TradeSide::Buy, Pair::BtcJpy, 0.1)
        .await
        .unwrap();

    assert_eq!(calculated.rate, 60000.0);
    assert_eq!(calculated.amount, Some(0.1));
    assert_eq!(calculated.price, Some(6000.0));
}

#[tokio::test]
async fn test_calculate_rate_by_price_embedded_error() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "success": false,
        "error": "Amount is too small"
    });

    Mock::given(method("GET"))
        .and(path("/exchange/orders/rate"))
        .and(query_param("price", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let err = client
        .calculate_rate_by_price(TradeSide::Sell, Pair::BtcJpy, 1.0)
        .await
        .unwrap_err();

    match err {
        CoincheckError::Endpoint { status, message } => {
            assert_eq!(status, None);
            assert_eq!(message, "Amount is too small");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_200_with_error_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ticker"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"success": false, "error": "not found"})),
        )
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let err = client.get_ticker(None).await.unwrap_err();

    assert!(matches!(
        &err,
        CoincheckError::Endpoint { status: Some(404), message } if message == "not found"
    ));
    assert_eq!(
        err.to_string(),
        "EndPointError: StatusCode[404], Error[not found]"
    );
}

#[tokio::test]
async fn test_non_200_with_unparseable_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/order_books"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let err = client.get_order_book().await.unwrap_err();

    match err {
        CoincheckError::Endpoint { status, message } => {
            assert_eq!(status, Some(502));
            assert_eq!(message, "");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_multiline_error_is_flattened() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trades"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"error": "pair is invalid\nlimit is invalid"})),
        )
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let err = client
        .get_trades(&TradesRequest::new(Pair::BtcJpy))
        .await
        .unwrap_err();
    assert_eq!(
        err.endpoint_message(),
        Some("pair is invalid | limit is invalid")
    );
}

#[tokio::test]
async fn test_malformed_number_is_format_error() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "last": 1, "bid": 1, "ask": 1, "high": 1, "low": 1,
        "volume": "lots",
        "timestamp": 1700000000
    });

    Mock::given(method("GET"))
        .and(path("/ticker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let err = client.get_ticker(None).await.unwrap_err();
    assert!(matches!(
        err,
        CoincheckError::Format { field: "volume", ref value } if value == "lots"
    ));
}

#[tokio::test]
async fn test_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RestClient::builder()
        .base_url(format!("http://{addr}"))
        .build();
    let err = client.get_rate(Pair::BtcJpy).await.unwrap_err();
    assert!(matches!(err, CoincheckError::Transport(_)));
}
