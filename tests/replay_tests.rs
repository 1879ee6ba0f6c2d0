// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for block-range replay against an in-memory source

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::U256;
use helpers::{
    tx_hash, CallOutcome, MockChainSource, MockTx, BASE_TIMESTAMP, TOKEN,
};
use tradescan::{
    BlockAggregator, BlockRange, HistoricalReplay, LiquidityStrategy, MetricAmount,
    MetricReading, MetricSelection, PointMetric, ReplayConfig, ReplayConfigBuilder, ReplayError,
    RpcError, VolumeDenomination,
};

fn volume_only() -> ReplayConfig {
    ReplayConfigBuilder::new().max_concurrency(8).build()
}

fn replay(source: MockChainSource, config: ReplayConfig) -> HistoricalReplay<MockChainSource> {
    HistoricalReplay::new(Arc::new(source), TOKEN, config)
}

/// Block with a buy, a two-log sell and an unrelated transaction
fn trading_block() -> Vec<MockTx> {
    vec![
        MockTx::buy(1, &[100]),
        MockTx::sell(2, &[50, 25]),
        MockTx::unrelated(3),
    ]
}

#[tokio::test]
async fn test_block_volume_sums_buys_and_sells() {
    let source = MockChainSource::new().with_block(10, trading_block());

    let report = replay(source, volume_only()).run(10, Some(10)).await.unwrap();

    let record = &report.records()[0];
    assert_eq!(record.block_number, 10);
    assert_eq!(record.timestamp, BASE_TIMESTAMP + 10);
    assert_eq!(record.transaction_count, 3);
    assert_eq!(record.volume, MetricAmount::from(175u64));
}

#[tokio::test(start_paused = true)]
async fn test_volume_independent_of_completion_order() {
    // The first transaction of the block resolves last
    let source = MockChainSource::new()
        .with_block(10, trading_block())
        .with_latency(tx_hash(1), Duration::from_millis(300))
        .with_latency(tx_hash(2), Duration::from_millis(100));

    let report = replay(source, volume_only()).run(10, Some(10)).await.unwrap();

    assert_eq!(report.records()[0].volume, MetricAmount::from(175u64));
}

#[tokio::test(start_paused = true)]
async fn test_slow_early_block_does_not_leak_into_neighbours() {
    let source = MockChainSource::new()
        .with_block(1, vec![MockTx::buy(1, &[10])])
        .with_block(2, vec![MockTx::buy(2, &[20]), MockTx::sell(3, &[5])])
        .with_block(3, vec![MockTx::sell(4, &[40])])
        .with_latency(tx_hash(1), Duration::from_millis(500))
        .with_latency(tx_hash(3), Duration::from_millis(200));

    let report = replay(source, volume_only()).run(1, Some(3)).await.unwrap();

    let volumes: Vec<_> = report.records().iter().map(|r| r.volume.clone()).collect();
    assert_eq!(
        volumes,
        vec![
            MetricAmount::from(10u64),
            MetricAmount::from(25u64),
            MetricAmount::from(40u64)
        ]
    );
}

#[tokio::test]
async fn test_empty_block_is_zero() {
    let source = MockChainSource::new()
        .with_empty_blocks([5])
        .with_price(5, U256::from(123u64));
    let config = ReplayConfigBuilder::with_defaults().build();

    let report = replay(source, config).run(5, Some(5)).await.unwrap();

    let record = &report.records()[0];
    assert!(!record.is_missing());
    assert!(record.volume.is_zero());
    assert_eq!(record.liquidity, MetricReading::zero());
    assert_eq!(record.price, MetricReading::value(123u64));
}

#[tokio::test]
async fn test_missing_block_keeps_its_slot() {
    let source = MockChainSource::new()
        .with_block(1, vec![MockTx::buy(1, &[10])])
        .with_block(3, vec![MockTx::buy(2, &[30])]);
    let config = ReplayConfigBuilder::with_defaults().build();
    let source = Arc::new(source);

    let report = HistoricalReplay::new(Arc::clone(&source), TOKEN, config)
        .run(1, Some(3))
        .await
        .unwrap();

    let records = report.records();
    assert_eq!(records.len(), 3);
    assert!(records[1].is_missing());
    assert_eq!(records[1].block_number, 2);
    assert!(records[1].volume.is_zero());
    assert_eq!(records[1].price, MetricReading::zero());
    assert_eq!(records[2].volume, MetricAmount::from(30u64));
    assert_eq!(report.missing_blocks(), 1);
    // No price read is issued for the missing block
    assert_eq!(source.call_requests(), 2);
}

#[tokio::test]
async fn test_missing_transaction_and_receipt_only_affect_themselves() {
    let source = MockChainSource::new().with_block(
        7,
        vec![
            MockTx::buy(1, &[100]).without_transaction(),
            MockTx::buy(2, &[40]).without_receipt(),
            MockTx::sell(3, &[8]),
        ],
    );

    let report = replay(source, volume_only()).run(7, Some(7)).await.unwrap();

    assert_eq!(report.records()[0].volume, MetricAmount::from(8u64));
    assert_eq!(report.records()[0].transaction_count, 3);
}

#[tokio::test]
async fn test_receipts_only_fetched_for_recognised_methods() {
    let source = Arc::new(MockChainSource::new().with_block(
        4,
        vec![
            MockTx::unrelated(1),
            MockTx::new(2, helpers::approve_input(), vec![helpers::bought_log(U256::from(9u64))]),
            MockTx::buy(3, &[1]),
        ],
    ));

    let report = HistoricalReplay::new(Arc::clone(&source), TOKEN, volume_only())
        .run(4, Some(4))
        .await
        .unwrap();

    assert_eq!(report.records()[0].volume, MetricAmount::from(1u64));
    assert_eq!(source.receipt_requests(), 1);
}

#[tokio::test]
async fn test_point_reads_alone_skip_transactions_and_receipts() {
    let source = Arc::new(
        MockChainSource::new()
            .with_block(6, trading_block())
            .with_price(6, U256::from(8u64))
            .with_liquidity(6, U256::from(900u64)),
    );
    let config = ReplayConfigBuilder::new()
        .volume(false)
        .liquidity(Some(LiquidityStrategy::PointInTime))
        .price(true)
        .build();

    let report = HistoricalReplay::new(Arc::clone(&source), TOKEN, config)
        .run(6, Some(6))
        .await
        .unwrap();

    let record = &report.records()[0];
    assert_eq!(record.transaction_count, 3);
    assert!(record.volume.is_zero());
    assert_eq!(record.liquidity, MetricReading::value(900u64));
    assert_eq!(record.price, MetricReading::value(8u64));
    assert_eq!(source.transaction_requests(), 0);
    assert_eq!(source.receipt_requests(), 0);
}

#[tokio::test]
async fn test_foreign_logs_are_ignored() {
    let mut buy = MockTx::buy(1, &[60]);
    if let Some(logs) = buy.logs.as_mut() {
        logs.insert(0, helpers::foreign_log());
        logs.push(helpers::transfer_log(U256::from(500u64)));
    }
    let source = MockChainSource::new().with_block(2, vec![buy]);

    let report = replay(source, volume_only()).run(2, Some(2)).await.unwrap();

    assert_eq!(report.records()[0].volume, MetricAmount::from(60u64));
}

#[tokio::test]
async fn test_volume_sum_is_exact_beyond_u64() {
    let big = U256::from(u64::MAX) * U256::from(1_000u64);
    let tx = MockTx::new(
        1,
        helpers::buy_input(),
        vec![helpers::bought_log(big), helpers::bought_log(big)],
    );
    let source = MockChainSource::new().with_block(1, vec![tx]);

    let report = replay(source, volume_only()).run(1, Some(1)).await.unwrap();

    assert_eq!(
        report.records()[0].volume,
        MetricAmount::from_u256(big * U256::from(2u64))
    );
}

#[tokio::test]
async fn test_volume_denomination_base() {
    // Helper logs carry beans = tokens / 10
    let source = MockChainSource::new().with_block(1, vec![MockTx::buy(1, &[1_000])]);
    let config = ReplayConfigBuilder::new()
        .volume_denomination(VolumeDenomination::Base)
        .build();

    let report = replay(source, config).run(1, Some(1)).await.unwrap();

    assert_eq!(report.records()[0].volume, MetricAmount::from(100u64));
}

#[tokio::test]
async fn test_log_replay_liquidity() {
    let source = MockChainSource::new().with_block(
        9,
        vec![
            MockTx::add_liquidity(1, &[300, 200]),
            MockTx::buy(2, &[10]),
        ],
    );
    let config = ReplayConfigBuilder::new()
        .liquidity(Some(LiquidityStrategy::LogReplay))
        .build();

    let report = replay(source, config).run(9, Some(9)).await.unwrap();

    let record = &report.records()[0];
    assert_eq!(record.liquidity, MetricReading::value(500u64));
    assert_eq!(record.volume, MetricAmount::from(10u64));
}

#[tokio::test]
async fn test_point_in_time_liquidity() {
    let source = MockChainSource::new()
        .with_block(9, vec![MockTx::add_liquidity(1, &[300])])
        .with_liquidity(9, U256::from(42_000u64));
    let config = ReplayConfigBuilder::new()
        .volume(false)
        .liquidity(Some(LiquidityStrategy::PointInTime))
        .build();

    let report = replay(source, config).run(9, Some(9)).await.unwrap();

    let record = &report.records()[0];
    assert_eq!(record.liquidity, MetricReading::value(42_000u64));
    assert!(record.volume.is_zero());
}

#[tokio::test]
async fn test_point_read_node_error_is_unavailable_not_zero() {
    let source = MockChainSource::new()
        .with_empty_blocks([1, 2])
        .with_price(1, U256::from(5u64))
        .with_call(
            2,
            PointMetric::Price,
            CallOutcome::Unavailable("missing trie node".to_string()),
        );
    let config = ReplayConfigBuilder::new().volume(false).price(true).build();

    let report = replay(source, config).run(1, Some(2)).await.unwrap();

    assert_eq!(report.records()[0].price, MetricReading::value(5u64));
    assert_eq!(
        report.records()[1].price,
        MetricReading::unavailable("missing trie node")
    );
    assert_eq!(report.unavailable_readings(), 1);
    assert!(report.to_display(18)[1].price_unavailable);
}

#[tokio::test]
async fn test_transport_failures_abort_without_records() {
    let cases = vec![
        MockChainSource::new()
            .with_block(1, trading_block())
            .failing_block(2),
        MockChainSource::new()
            .with_block(1, trading_block())
            .failing_transaction(tx_hash(3)),
        MockChainSource::new()
            .with_block(1, trading_block())
            .failing_receipt(tx_hash(2)),
        MockChainSource::new()
            .with_block(1, trading_block())
            .with_call(1, PointMetric::Price, CallOutcome::TransportFailure),
    ];

    for source in cases {
        let config = ReplayConfigBuilder::new().price(true).build();
        let result = replay(source, config).run(1, Some(2)).await;
        assert!(
            matches!(result, Err(ReplayError::Rpc(_))),
            "expected transport failure, got {result:?}"
        );
    }
}

#[tokio::test]
async fn test_unrecognised_method_never_requests_receipt() {
    // Receipt is never requested for an unrelated transaction, so its failure is not observed
    let source = MockChainSource::new()
        .with_block(1, vec![MockTx::unrelated(1)])
        .failing_receipt(tx_hash(1));

    let report = replay(source, volume_only()).run(1, Some(1)).await.unwrap();
    assert!(report.records()[0].volume.is_zero());
}

#[tokio::test]
async fn test_chunking_preserves_order_and_length() {
    let mut source = MockChainSource::new();
    for number in 100..=112u64 {
        source = source.with_block(number, vec![MockTx::buy(number, &[number])]);
    }
    let config = ReplayConfigBuilder::new().chunk_size(4).max_concurrency(3).build();

    let report = replay(source, config).run(100, Some(112)).await.unwrap();

    assert_eq!(report.len(), 13);
    for (offset, record) in report.records().iter().enumerate() {
        let number = 100 + offset as u64;
        assert_eq!(record.block_number, number);
        assert_eq!(record.volume, MetricAmount::from(number));
    }
    assert_eq!(
        report.totals().volume,
        MetricAmount::from((100..=112u64).sum::<u64>())
    );
}

#[tokio::test]
async fn test_open_end_replays_through_head() {
    let source = MockChainSource::new()
        .with_empty_blocks(20..=24)
        .with_head(24);

    let report = replay(source, volume_only()).run(21, None).await.unwrap();

    assert_eq!(report.range(), BlockRange::new(21, 24).unwrap());
    assert_eq!(report.len(), 4);
}

#[tokio::test]
async fn test_invalid_range_and_empty_selection() {
    let result = replay(MockChainSource::new(), volume_only())
        .run(10, Some(9))
        .await;
    assert!(matches!(
        result,
        Err(ReplayError::InvalidRange { start: 10, end: 9 })
    ));

    let config = ReplayConfigBuilder::new()
        .metrics(MetricSelection::none())
        .build();
    let result = replay(MockChainSource::new(), config).run(1, Some(1)).await;
    assert!(matches!(result, Err(ReplayError::EmptySelection)));
}

#[tokio::test]
async fn test_rerun_is_identical() {
    let source = MockChainSource::new()
        .with_block(1, trading_block())
        .with_block(2, vec![MockTx::add_liquidity(4, &[7])])
        .with_price(2, U256::from(3u64));
    let replay = replay(source, ReplayConfig::default());

    let first = replay.run(1, Some(3)).await.unwrap();
    let second = replay.run(1, Some(3)).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_aggregator_direct() {
    let source = Arc::new(MockChainSource::new().with_block(1, trading_block()));
    let aggregator = BlockAggregator::new(source, TOKEN, &volume_only());

    let records = aggregator.aggregate(BlockRange::single(1)).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].volume, MetricAmount::from(175u64));
}

#[tokio::test]
async fn test_rpc_error_is_preserved_in_replay_error() {
    let source = MockChainSource::new().failing_block(1);
    let err = replay(source, volume_only())
        .run(1, Some(1))
        .await
        .unwrap_err();

    match err {
        ReplayError::Rpc(RpcError::GetBlockFailed { block_number, .. }) => {
            assert_eq!(block_number, 1)
        }
        other => panic!("unexpected error {other:?}"),
    }
}
