//! Loyalty leveling and referral flows across sessions.

use anyhow::Result;
use rust_decimal::Decimal;

use levelup::prelude::*;

#[test]
fn worked_leveling_example() -> Result<()> {
    let table = LevelTable::new(vec![0, 100, 300, 600, 1200])?;

    let status = table.status_of(450);

    assert_eq!(status.level, 2);
    assert_eq!(status.next_level, 3);
    assert_eq!(status.progress_percent, Decimal::from(50));
    assert_eq!(status.points_to_next, 150);

    Ok(())
}

#[test]
fn award_events_walk_up_the_tiers() -> Result<()> {
    let table = LevelTable::default();
    let mut account = PointsAccount::new();
    let mut last_level = 0;

    let awards = [
        PointAward::Registration,
        PointAward::Referral,
        PointAward::Review,
        PointAward::Activity(250),
        PointAward::Activity(1200),
    ];

    for award in awards {
        let balance = account.award(award);
        let status = table.status_of(balance);

        assert!(status.level >= last_level, "levels must never demote");
        assert!(status.progress_percent >= Decimal::ZERO);
        assert!(status.progress_percent <= Decimal::ONE_HUNDRED);

        last_level = status.level;
    }

    // 100 + 500 + 50 + 250 + 1200 = 2100: top of the default table.
    assert_eq!(account.balance(), 2100);
    assert_eq!(table.status_of(account.balance()).level, table.max_level());

    Ok(())
}

#[test]
fn referral_registration_credits_both_users() -> Result<()> {
    let mut ledger = ReferralLedger::new();
    let mut rng = rand::thread_rng();

    let mut ana = Session::open(
        MemoryStore::new(),
        CartConfig::default(),
        LevelTable::default(),
    )?;
    let ana_registration = ana.register(&mut rng, "ana", None, &mut ledger)?;

    let mut benja = Session::open(
        MemoryStore::new(),
        CartConfig::default(),
        LevelTable::default(),
    )?;
    let benja_registration = benja.register(
        &mut rng,
        "benja",
        Some(&ana_registration.referral_code),
        &mut ledger,
    )?;

    // The new user's award is applied by registration itself.
    assert_eq!(
        benja.profile().map(|profile| profile.points.balance()),
        Some(600)
    );

    // The referrer's award is the second, independent call.
    assert_eq!(benja_registration.referrer.as_deref(), Some("ana"));
    ana.award_points(PointAward::Referral)?;
    assert_eq!(
        ana.profile().map(|profile| profile.points.balance()),
        Some(600)
    );

    // 600 points lands both exactly on the level-3 threshold.
    assert_eq!(ana.level_status()?.level, 3);
    assert_eq!(benja.level_status()?.level, 3);

    Ok(())
}

#[test]
fn review_award_moves_the_progress_bar() -> Result<()> {
    let mut ledger = ReferralLedger::new();
    let mut rng = rand::thread_rng();

    let mut session = Session::open(
        MemoryStore::new(),
        CartConfig::default(),
        LevelTable::default(),
    )?;
    session.register(&mut rng, "carla", None, &mut ledger)?;

    let before = session.level_status()?;
    session.award_points(PointAward::Review)?;
    let after = session.level_status()?;

    assert!(after.progress_percent > before.progress_percent);
    assert!(after.points_to_next < before.points_to_next);

    Ok(())
}
