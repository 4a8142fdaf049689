use crate::integration::mocks::{create_erc20_descriptor, MockEVMTransportClient};
use alloy::primitives::U256;
use contract_query::{
	bootstrap::{
		create_targets, initialize_repository, run_queries, run_query, validate_configuration,
		QueryRequest, QueryTarget,
	},
	repositories::ContractRepository,
	services::blockchain::{QueryClient, QueryError, TransportError},
	utils::{
		tests::{
			builders::contract::ERC20_ABI_JSON,
			rpc::{block_result, uint256_result},
		},
		JitterSetting, RetryConfig,
	},
};
use serde_json::{json, Value};
use std::{
	fs,
	sync::{
		atomic::{AtomicUsize, Ordering},
		Arc,
	},
	time::Duration,
};
use tempfile::TempDir;

fn fast_retry() -> RetryConfig {
	RetryConfig {
		max_retries: 2,
		initial_backoff: Duration::from_millis(1),
		max_backoff: Duration::from_millis(2),
		jitter: JitterSetting::None,
		..RetryConfig::default()
	}
}

fn target(
	slug: &str,
	transport: MockEVMTransportClient,
) -> QueryTarget<QueryClient<MockEVMTransportClient>> {
	QueryTarget {
		name: format!("{} Token", slug.to_uppercase()),
		slug: slug.to_string(),
		client: QueryClient::new_with_transport(transport, create_erc20_descriptor()),
		retry: fast_retry(),
	}
}

#[tokio::test]
async fn test_run_query_recovers_from_flaky_endpoint() {
	let attempts = Arc::new(AtomicUsize::new(0));
	let counter = attempts.clone();

	let mut transport = MockEVMTransportClient::new();
	transport
		.expect_send_raw_request()
		.times(2)
		.returning(move |_: &str, _: Option<Value>| {
			if counter.fetch_add(1, Ordering::SeqCst) == 0 {
				Err(TransportError::network("connection reset", None, None))
			} else {
				Ok(uint256_result(U256::from(99)))
			}
		});

	let outcome = run_query(&target("cns", transport), &QueryRequest::default()).await;

	assert_eq!(outcome.result.unwrap().as_uint(), Some(U256::from(99)));
	assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_run_query_does_not_retry_decode_failures() {
	let mut transport = MockEVMTransportClient::new();
	transport
		.expect_send_raw_request()
		.times(1)
		.returning(|_: &str, _: Option<Value>| {
			Ok(json!({"jsonrpc": "2.0", "id": 1, "result": "0x"}))
		});

	let outcome = run_query(&target("cns", transport), &QueryRequest::default()).await;

	assert!(matches!(outcome.result, Err(QueryError::DecodeFailure(_))));
}

#[tokio::test]
async fn test_run_queries_with_latest_block() {
	let mut cns = MockEVMTransportClient::new();
	cns.expect_send_raw_request()
		.returning(|method: &str, _: Option<Value>| match method {
			"eth_call" => Ok(uint256_result(U256::from(1_000u64))),
			_ => Ok(block_result(100, 1_700_000_000)),
		});

	let mut cnr = MockEVMTransportClient::new();
	cnr.expect_send_raw_request()
		.returning(|method: &str, _: Option<Value>| match method {
			"eth_call" => Ok(uint256_result(U256::from(2_000u64))),
			_ => Ok(block_result(100, 1_700_000_000)),
		});

	let request = QueryRequest {
		latest_block: true,
		..QueryRequest::default()
	};
	let outcomes = run_queries(&[target("cns", cns), target("cnr", cnr)], &request).await;

	assert_eq!(outcomes.len(), 2);
	assert_eq!(outcomes[0].slug, "cns");
	assert_eq!(
		outcomes[0].result.as_ref().unwrap().as_uint(),
		Some(U256::from(1_000u64))
	);
	assert_eq!(
		outcomes[1].result.as_ref().unwrap().as_uint(),
		Some(U256::from(2_000u64))
	);
	for outcome in &outcomes {
		assert!(outcome.is_success());
		assert_eq!(outcome.latest_block.as_ref().unwrap().as_ref().unwrap().number, 100);
	}
}

#[tokio::test]
async fn test_run_query_with_string_arguments() {
	let mut transport = MockEVMTransportClient::new();
	transport
		.expect_send_raw_request()
		.times(1)
		.returning(|_: &str, _: Option<Value>| Ok(uint256_result(U256::from(5))));

	let request = QueryRequest {
		method: "balanceOf".to_string(),
		args: vec!["0xee43d9f2c068bfa67726f78dd17da5443d9fcd03".to_string()],
		latest_block: false,
	};
	let outcome = run_query(&target("cns", transport), &request).await;

	assert_eq!(outcome.result.unwrap().as_uint(), Some(U256::from(5)));
}

fn write_contract(dir: &std::path::Path, slug: &str, address: &str) {
	let config = json!({
		"name": format!("{} Token", slug.to_uppercase()),
		"slug": slug,
		"endpoint_url": {"type": "plain", "value": "https://bsc-dataseed1.binance.org/"},
		"contract_address": address,
		"interface": {"path": "erc20.abi"}
	});
	fs::write(dir.join(format!("{}.json", slug)), config.to_string()).unwrap();
}

#[tokio::test]
async fn test_validate_configuration() {
	let dir = TempDir::new().unwrap();
	// The ABI is not a contract configuration, so it must not end in .json
	fs::write(dir.path().join("erc20.abi"), ERC20_ABI_JSON).unwrap();
	write_contract(dir.path(), "cns", "0xee43d9f2c068bfa67726f78dd17da5443d9fcd03");
	write_contract(dir.path(), "cnr", "0xde5eba79d6f1a5dc47b5ae0199d0d24a66f3d11a");

	assert_eq!(validate_configuration(Some(dir.path())).await.unwrap(), 2);

	let repository = initialize_repository::<ContractRepository>(None, Some(dir.path()))
		.await
		.unwrap();
	let targets = create_targets(&repository, &["cnr".to_string()], None).unwrap();
	assert_eq!(targets.len(), 1);
	assert_eq!(targets[0].client.methods().len(), 6);
}

#[tokio::test]
async fn test_validate_configuration_missing_directory() {
	let dir = TempDir::new().unwrap();
	assert!(validate_configuration(Some(dir.path().join("missing").as_path()))
		.await
		.is_err());
}
