use crate::integration::mocks::{
	create_erc20_descriptor, create_single_method_descriptor, DelayedTransport,
	MockEVMTransportClient, CNS_ADDRESS,
};
use alloy::{
	core::dyn_abi::{DynSolType, DynSolValue},
	primitives::{Address, U256},
};
use contract_query::{
	services::blockchain::{
		ContractQuery, QueryClient, QueryError, TransportError, TransportFailureKind,
	},
	utils::tests::rpc::{block_result, rpc_result, uint256_result},
};
use mockall::predicate;
use serde_json::{json, Value};
use std::{
	str::FromStr,
	time::{Duration, Instant},
};

fn client_with(mock: MockEVMTransportClient) -> QueryClient<MockEVMTransportClient> {
	QueryClient::new_with_transport(mock, create_erc20_descriptor())
}

#[tokio::test]
async fn test_total_supply_success() {
	let mut mock_transport = MockEVMTransportClient::new();
	let supply = U256::from(1_000_000_000_000_000_000_000u128);

	mock_transport
		.expect_send_raw_request()
		.with(
			predicate::eq("eth_call"),
			predicate::eq(Some(json!([
				{"to": CNS_ADDRESS, "data": "0x18160ddd"},
				"latest"
			]))),
		)
		.times(1)
		.returning(move |_: &str, _: Option<Value>| Ok(uint256_result(supply)));

	let client = client_with(mock_transport);
	let result = client.call("totalSupply", &[]).await.unwrap();

	assert_eq!(result.method(), "totalSupply");
	assert_eq!(result.kind(), &DynSolType::Uint(256));
	assert_eq!(result.as_uint(), Some(supply));
	assert_eq!(result.to_string(), "1000000000000000000000");
}

#[tokio::test]
async fn test_large_integer_decodes_exactly() {
	let mut mock_transport = MockEVMTransportClient::new();
	let large = U256::from_str("123456789012345678901234567890").unwrap();

	mock_transport
		.expect_send_raw_request()
		.returning(move |_: &str, _: Option<Value>| Ok(uint256_result(large)));

	let client = client_with(mock_transport);
	let result = client.call("totalSupply", &[]).await.unwrap();

	assert_eq!(result.as_uint(), Some(large));
	assert_eq!(result.to_string(), "123456789012345678901234567890");
	assert_eq!(result.to_json()["value"], "123456789012345678901234567890");
}

#[tokio::test]
async fn test_unknown_method_does_not_touch_transport() {
	let mut mock_transport = MockEVMTransportClient::new();
	mock_transport.expect_send_raw_request().times(0);

	let client = client_with(mock_transport);
	let result = client.call("mint", &[]).await;

	match result {
		Err(QueryError::UnknownMethod(context)) => {
			assert!(context.message.contains("mint"));
		}
		other => panic!("expected UnknownMethod, got {:?}", other),
	}
	// A non-read method declared in the ABI is not callable either
	assert!(matches!(
		client.call("transfer", &[]).await,
		Err(QueryError::UnknownMethod(_))
	));
}

#[tokio::test]
async fn test_argument_mismatch_does_not_touch_transport() {
	let mut mock_transport = MockEVMTransportClient::new();
	mock_transport.expect_send_raw_request().times(0);

	let client = client_with(mock_transport);

	assert!(matches!(
		client.call("balanceOf", &[]).await,
		Err(QueryError::ArgumentMismatch(_))
	));
	assert!(matches!(
		client
			.call("balanceOf", &[DynSolValue::Uint(U256::from(1), 256)])
			.await,
		Err(QueryError::ArgumentMismatch(_))
	));
	assert!(matches!(
		client.call_with_str_args("balanceOf", &["not-an-address"]).await,
		Err(QueryError::ArgumentMismatch(_))
	));
}

#[tokio::test]
async fn test_balance_of_encodes_argument() {
	let mut mock_transport = MockEVMTransportClient::new();
	let holder = Address::from_str(CNS_ADDRESS).unwrap();
	let expected_data = format!("0x70a08231{:0>64}", &CNS_ADDRESS[2..]);

	mock_transport
		.expect_send_raw_request()
		.withf(move |method, params| {
			method == "eth_call"
				&& params.as_ref().map(|p| p[0]["data"].clone()) == Some(json!(expected_data))
		})
		.times(2)
		.returning(|_: &str, _: Option<Value>| Ok(uint256_result(U256::from(42))));

	let client = client_with(mock_transport);

	let typed = client
		.call("balanceOf", &[DynSolValue::Address(holder)])
		.await
		.unwrap();
	let textual = client
		.call_with_str_args("balanceOf", &[CNS_ADDRESS])
		.await
		.unwrap();

	assert_eq!(typed, textual);
	assert_eq!(typed.as_uint(), Some(U256::from(42)));
}

#[tokio::test]
async fn test_unparsable_response_is_decode_failure() {
	let responses = [
		rpc_result("0x"),
		rpc_result("0x1234"),
		rpc_result("not hex"),
		rpc_result(json!(12)),
		json!({"jsonrpc": "2.0", "id": 1}),
		json!({"jsonrpc": "2.0", "id": 1, "result": null}),
	];

	for response in responses {
		let mut mock_transport = MockEVMTransportClient::new();
		let body = response.clone();
		mock_transport
			.expect_send_raw_request()
			.times(1)
			.returning(move |_: &str, _: Option<Value>| Ok(body.clone()));

		let client = client_with(mock_transport);
		let result = client.call("totalSupply", &[]).await;

		assert!(
			matches!(result, Err(QueryError::DecodeFailure(_))),
			"response {} should fail to decode, got {:?}",
			response,
			result
		);
	}
}

#[tokio::test]
async fn test_transport_errors_map_to_kinds() {
	let cases: Vec<(fn() -> TransportError, TransportFailureKind)> = vec![
		(
			|| TransportError::network("connection refused", None, None),
			TransportFailureKind::Unreachable,
		),
		(
			|| TransportError::rpc(-32000, "execution reverted", None),
			TransportFailureKind::Rpc,
		),
		(
			|| TransportError::response_parse("not json", None, None),
			TransportFailureKind::InvalidResponse,
		),
		(
			|| TransportError::timeout("no response", None, None),
			TransportFailureKind::Timeout,
		),
	];

	for (error, kind) in cases {
		let mut mock_transport = MockEVMTransportClient::new();
		mock_transport
			.expect_send_raw_request()
			.times(1)
			.returning(move |_: &str, _: Option<Value>| Err(error()));

		let client = client_with(mock_transport);
		let err = client.call("totalSupply", &[]).await.unwrap_err();

		assert_eq!(err.transport_kind(), Some(kind));
		assert!(err.is_transient());
	}
}

#[tokio::test]
async fn test_repeated_calls_are_idempotent() {
	let mut mock_transport = MockEVMTransportClient::new();
	mock_transport
		.expect_send_raw_request()
		.times(2)
		.returning(|_: &str, _: Option<Value>| Ok(uint256_result(U256::from(777))));

	let client = client_with(mock_transport);
	let first = client.call("totalSupply", &[]).await.unwrap();
	let second = client.call("totalSupply", &[]).await.unwrap();

	assert_eq!(first, second);
}

#[tokio::test]
async fn test_string_return() {
	let mut mock_transport = MockEVMTransportClient::new();
	let encoded = format!(
		"0x{}",
		hex::encode(DynSolValue::String("Coin Name Share".to_string()).abi_encode())
	);
	mock_transport
		.expect_send_raw_request()
		.returning(move |_: &str, _: Option<Value>| Ok(rpc_result(encoded.clone())));

	let client = client_with(mock_transport);
	let result = client.call("name", &[]).await.unwrap();

	assert_eq!(result.kind(), &DynSolType::String);
	assert_eq!(result.to_string(), "Coin Name Share");
}

#[tokio::test]
async fn test_method_table_descriptor() {
	let mut mock_transport = MockEVMTransportClient::new();
	mock_transport
		.expect_send_raw_request()
		.times(1)
		.returning(|_: &str, _: Option<Value>| Ok(uint256_result(U256::from(18))));

	let client = QueryClient::new_with_transport(
		mock_transport,
		create_single_method_descriptor("decimals", &[], "uint8"),
	);

	assert_eq!(client.methods(), vec!["decimals"]);
	let result = client.call("decimals", &[]).await.unwrap();
	assert_eq!(result.kind(), &DynSolType::Uint(8));
	assert_eq!(result.as_uint(), Some(U256::from(18)));
	assert!(matches!(
		client.call("totalSupply", &[]).await,
		Err(QueryError::UnknownMethod(_))
	));
}

#[tokio::test]
async fn test_latest_block() {
	let mut mock_transport = MockEVMTransportClient::new();
	mock_transport
		.expect_send_raw_request()
		.with(
			predicate::eq("eth_getBlockByNumber"),
			predicate::eq(Some(json!(["latest", false]))),
		)
		.times(1)
		.returning(|_: &str, _: Option<Value>| Ok(block_result(48_000_000, 1_745_000_000)));

	let client = client_with(mock_transport);
	let block = client.latest_block().await.unwrap();

	assert_eq!(block.number, 48_000_000);
	assert_eq!(block.timestamp, 1_745_000_000);
}

#[tokio::test]
async fn test_latest_block_malformed_header() {
	let mut mock_transport = MockEVMTransportClient::new();
	mock_transport
		.expect_send_raw_request()
		.returning(|_: &str, _: Option<Value>| Ok(rpc_result(json!({"number": "zero"}))));

	let client = client_with(mock_transport);
	assert!(matches!(
		client.latest_block().await,
		Err(QueryError::DecodeFailure(_))
	));
}

#[tokio::test]
async fn test_slow_transport_times_out_within_margin() {
	let transport = DelayedTransport::new(
		Duration::from_secs(5),
		uint256_result(U256::from(1)),
	);
	let client = QueryClient::new_with_transport(transport.clone(), create_erc20_descriptor())
		.with_timeout(Duration::from_millis(100));

	let started = Instant::now();
	let err = client.call("totalSupply", &[]).await.unwrap_err();
	let elapsed = started.elapsed();

	assert!(err.is_timeout());
	assert!(elapsed >= Duration::from_millis(100));
	assert!(elapsed < Duration::from_secs(2), "took {:?}", elapsed);
	assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_call_with_timeout_overrides_default() {
	let transport = DelayedTransport::new(
		Duration::from_millis(300),
		uint256_result(U256::from(1)),
	);
	let client = QueryClient::new_with_transport(transport, create_erc20_descriptor())
		.with_timeout(Duration::from_millis(50));

	assert!(client.call("totalSupply", &[]).await.unwrap_err().is_timeout());

	let result = client
		.call_with_timeout("totalSupply", &[], Duration::from_secs(5))
		.await
		.unwrap();
	assert_eq!(result.as_uint(), Some(U256::from(1)));
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
	let transport = DelayedTransport::new(
		Duration::from_millis(200),
		uint256_result(U256::from(5)),
	);
	let client = QueryClient::new_with_transport(transport.clone(), create_erc20_descriptor());

	let started = Instant::now();
	let results =
		futures::future::join_all((0..10).map(|_| client.call("totalSupply", &[]))).await;

	assert!(results
		.iter()
		.all(|r| matches!(r, Ok(v) if v.as_uint() == Some(U256::from(5)))));
	assert_eq!(transport.request_count(), 10);
	// Calls overlap instead of running one after another
	assert!(started.elapsed() < Duration::from_millis(1500));
}
