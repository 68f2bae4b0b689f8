//! # Dispatch Benchmarks
//!
//! | Path | Work per call |
//! |------|---------------|
//! | selector resolution | one map lookup under a read lock |
//! | static dispatch | resolution plus one storage read |
//! | mutating dispatch | resolution plus one storage write |

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use deploy_runtime::{deploy_system, DeployConfig, DeployedSystem, InMemoryChain};
use la_01_account_storage::{AccountKeys, NATIVE_ASSET};
use shared_types::{Address, CallArgs, Selector, U256};

const ADMIN: Address = Address::from_low_u8(1);
const ASSET: Address = Address::from_low_u8(2);
const ADDING: Address = Address::from_low_u8(3);

fn deployed() -> DeployedSystem {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let config = DeployConfig {
        deploy_test_fixtures: false,
        ..DeployConfig::default()
    };
    let chain = InMemoryChain::new(config.deployer);
    runtime.block_on(deploy_system(&config, &chain)).unwrap()
}

fn bench_dispatch(c: &mut Criterion) {
    let system = deployed();
    let account = system
        .creator
        .create_account(AccountKeys::new(ADMIN, ASSET, ADDING), Vec::new(), 0)
        .unwrap();
    account.deposit(NATIVE_ASSET, U256::MAX).unwrap();

    let mut group = c.benchmark_group("logic-manager");

    let balance = Selector::from_signature("getBalance(address)");
    group.bench_function("resolve", |b| {
        b.iter(|| black_box(system.manager.resolve(black_box(balance)).unwrap()))
    });

    let balance_args = CallArgs::new().with(NATIVE_ASSET);
    group.bench_function("static_call_get_balance", |b| {
        b.iter(|| black_box(account.static_call(balance, &balance_args, 1).unwrap()))
    });

    let transfer = Selector::from_signature("transferNative(address,uint256)");
    let transfer_args = CallArgs::new().with(Address::from_low_u8(0x55)).with(U256::one());
    group.bench_function("invoke_transfer_native", |b| {
        b.iter(|| black_box(account.invoke(transfer, ASSET, &transfer_args, 1).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
