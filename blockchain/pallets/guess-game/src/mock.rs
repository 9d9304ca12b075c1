use core::cell::Cell;
use core::time::Duration;

use frame::{
    deps::{
        frame_support::{traits::AsEnsureOriginWithArg, weights::constants::RocksDbWeight},
        frame_system::GenesisConfig,
    },
    prelude::*,
    runtime::prelude::*,
    testing_prelude::*,
    traits::fungibles,
};
use guess_core::{Moment, RulesVersion};
use polkadot_sdk::{pallet_assets, pallet_balances};

pub const ADMIN: u64 = 1;
pub const ALICE: u64 = 2;
pub const BOB: u64 = 3;
pub const CAROL: u64 = 4;

/// Asset games are staked in.
pub const TOKEN: u32 = 7;
pub const INITIAL_FUNDS: u64 = 1_000_000;

pub const DAY: Moment = 86_400;
pub const T0: Moment = 1_700_000_000;

// Configure a mock runtime to test the pallet.
#[frame_construct_runtime]
mod test_runtime {
    #[runtime::runtime]
    #[runtime::derive(
        RuntimeCall,
        RuntimeEvent,
        RuntimeError,
        RuntimeOrigin,
        RuntimeFreezeReason,
        RuntimeHoldReason,
        RuntimeSlashReason,
        RuntimeLockId,
        RuntimeTask,
        RuntimeViewFunction
    )]
    pub struct Test;

    #[runtime::pallet_index(0)]
    pub type System = frame_system;
    #[runtime::pallet_index(1)]
    pub type GuessGame = crate;
    #[runtime::pallet_index(2)]
    pub type Balances = pallet_balances;
    #[runtime::pallet_index(3)]
    pub type Assets = pallet_assets;
}

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Nonce = u64;
    type Block = MockBlock<Test>;
    type BlockHashCount = ConstU64<250>;
    type DbWeight = RocksDbWeight;
    type AccountData = pallet_balances::AccountData<u64>;
}

impl pallet_balances::Config for Test {
    type Balance = u64;
    type RuntimeEvent = RuntimeEvent;
    type DustRemoval = ();
    type ExistentialDeposit = ConstU64<1>;
    type AccountStore = System;
    type MaxLocks = ConstU32<50>;
    type MaxReserves = ConstU32<50>;
    type ReserveIdentifier = [u8; 8];
    type WeightInfo = ();
    type RuntimeHoldReason = RuntimeHoldReason;
    type RuntimeFreezeReason = RuntimeFreezeReason;
    type FreezeIdentifier = RuntimeFreezeReason;
    type MaxFreezes = ConstU32<0>;
    type DoneSlashHandler = ();
}

#[derive_impl(pallet_assets::config_preludes::TestDefaultConfig)]
impl pallet_assets::Config for Test {
    type Currency = Balances;
    type CreateOrigin = AsEnsureOriginWithArg<frame_system::EnsureSigned<u64>>;
    type ForceOrigin = frame_system::EnsureRoot<u64>;
    type Freezer = ();
}

thread_local! {
    static RANDOM_SEED: Cell<u64> = const { Cell::new(0) };
    static NOW: Cell<Moment> = const { Cell::new(T0) };
}

/// Randomness derived from a seed the tests can pin.
pub struct MockRandomness;
impl
    frame::deps::frame_support::traits::Randomness<
        <Test as frame_system::Config>::Hash,
        BlockNumberFor<Test>,
    > for MockRandomness
{
    fn random(subject: &[u8]) -> (<Test as frame_system::Config>::Hash, BlockNumberFor<Test>) {
        let seed = RANDOM_SEED.with(|s| s.get());
        let mut data = seed.to_le_bytes().to_vec();
        data.extend_from_slice(subject);
        let hash = frame::hashing::blake2_256(&data);
        (hash.into(), System::block_number())
    }
}

pub fn set_random_seed(seed: u64) {
    RANDOM_SEED.with(|s| s.set(seed));
}

/// Wall clock the tests move by hand.
pub struct MockTime;
impl frame::traits::UnixTime for MockTime {
    fn now() -> Duration {
        Duration::from_secs(NOW.with(|n| n.get()))
    }
}

pub fn set_now(now: Moment) {
    NOW.with(|n| n.set(now));
}

frame::deps::frame_support::parameter_types! {
    pub const GuessGamePalletId: frame::deps::frame_support::PalletId =
        frame::deps::frame_support::PalletId(*b"gssgame!");
}

impl crate::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Assets = Assets;
    type Randomness = MockRandomness;
    type TimeProvider = MockTime;
    type PalletId = GuessGamePalletId;
    type MaxIntervals = ConstU32<30>;
    type MaxNumbersPerUser = ConstU32<3>;
    type MaxStakedNumbers = ConstU32<5>;
    type MaxHistory = ConstU32<4>;
    type WeightInfo = ();
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> TestState {
    let mut t = GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_balances::GenesisConfig::<Test> {
        balances: vec![(ADMIN, 10_000), (ALICE, 10_000), (BOB, 10_000), (CAROL, 10_000)],
        dev_accounts: None,
    }
    .assimilate_storage(&mut t)
    .unwrap();

    crate::GenesisConfig::<Test> {
        admin: Some(ADMIN),
        implementation: Some(RulesVersion::WeightedAverageV1),
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext: TestState = t.into();
    ext.execute_with(|| {
        // Events are not recorded in block 0
        System::set_block_number(1);
        set_now(T0);
        set_random_seed(0);

        assert_ok!(Assets::force_create(RuntimeOrigin::root(), TOKEN, ADMIN, true, 1));
        for who in [ALICE, BOB, CAROL] {
            assert_ok!(<Assets as fungibles::Mutate<u64>>::mint_into(
                TOKEN,
                &who,
                INITIAL_FUNDS
            ));
        }
    });
    ext
}
