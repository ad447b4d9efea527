use anchor_lang::prelude::*;

use crate::constants::MAX_BENEFICIARIES;
use crate::error::LedgerError;
use crate::utils::vesting;

/// A single beneficiary schedule stored in the schedules PDA.
///
/// Once registered only `released_amount`, `start_ts`/`started` and `revoked`
/// mutate; `total_amount` and the cliff/duration/time_unit triple are fixed.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct ScheduleEntry {
    pub beneficiary: Pubkey,
    pub total_amount: u64,
    pub released_amount: u64,
    pub cliff_units: u64,
    pub duration_units: u64,
    pub time_unit: u64,
    /// Vesting anchor timestamp; 0 until activation.
    pub start_ts: i64,
    pub started: u8,
    pub revoked: u8,
    pub _padding: [u8; 6],
}

impl Default for ScheduleEntry {
    fn default() -> Self {
        Self {
            beneficiary: Pubkey::default(),
            total_amount: 0,
            released_amount: 0,
            cliff_units: 0,
            duration_units: 0,
            time_unit: 0,
            start_ts: 0,
            started: 0,
            revoked: 0,
            _padding: [0u8; 6],
        }
    }
}

impl ScheduleEntry {
    pub const SIZE: usize = core::mem::size_of::<ScheduleEntry>();

    /// Validate and build a fresh (unstarted, unrevoked) entry.
    pub fn new(
        beneficiary: Pubkey,
        cliff_units: u64,
        duration_units: u64,
        time_unit: u64,
        total_amount: u64,
    ) -> core::result::Result<Self, LedgerError> {
        if beneficiary == Pubkey::default() {
            return Err(LedgerError::InvalidPubkey);
        }
        if cliff_units > duration_units || total_amount == 0 {
            return Err(LedgerError::InvalidSchedule);
        }
        Ok(Self {
            beneficiary,
            total_amount,
            cliff_units,
            duration_units,
            time_unit,
            ..Self::default()
        })
    }

    /// Stamp the vesting anchor. Set exactly once, irreversible.
    pub fn activate(&mut self, now_ts: i64) -> core::result::Result<(), LedgerError> {
        if self.started != 0 {
            return Err(LedgerError::AlreadyStarted);
        }
        self.start_ts = now_ts;
        self.started = 1;
        Ok(())
    }

    /// Cumulative entitlement unlocked at `now_ts`; 0 before activation.
    pub fn vested_amount(&self, now_ts: i64) -> core::result::Result<u64, LedgerError> {
        if self.started == 0 {
            return Ok(0);
        }
        vesting::vested_amount(
            self.total_amount,
            self.cliff_units,
            self.duration_units,
            self.time_unit,
            self.start_ts,
            now_ts,
        )
    }

    /// Vested-but-unpaid balance at `now_ts`.
    pub fn releasable(&self, now_ts: i64) -> core::result::Result<u64, LedgerError> {
        self.vested_amount(now_ts)?
            .checked_sub(self.released_amount)
            .ok_or(LedgerError::MathOverflow)
    }

    pub fn cliff_reached(&self, now_ts: i64) -> core::result::Result<bool, LedgerError> {
        let elapsed = vesting::elapsed_since(now_ts, self.start_ts);
        Ok(elapsed >= vesting::cliff_span(self.cliff_units, self.time_unit)?)
    }

    /// Guard a release and return the payable amount. State is untouched:
    /// the caller commits via `commit_release` only after the transfer lands.
    pub fn prepare_release(&self, now_ts: i64) -> core::result::Result<u64, LedgerError> {
        if self.started == 0 {
            return Err(LedgerError::NotStarted);
        }
        if self.revoked != 0 {
            return Err(LedgerError::ScheduleRevoked);
        }
        if !self.cliff_reached(now_ts)? {
            return Err(LedgerError::CliffNotReached);
        }
        self.releasable(now_ts)
    }

    pub fn commit_release(&mut self, amount: u64) -> core::result::Result<(), LedgerError> {
        self.released_amount = self
            .released_amount
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;
        Ok(())
    }

    /// Guard a revocation and return the final payout. Unlike a release, a
    /// revocation before the cliff finalizes with a zero payout.
    pub fn prepare_revoke(&self, now_ts: i64) -> core::result::Result<u64, LedgerError> {
        if self.started == 0 {
            return Err(LedgerError::NotStarted);
        }
        if self.revoked != 0 {
            return Err(LedgerError::AlreadyRevoked);
        }
        if !self.cliff_reached(now_ts)? {
            return Ok(0);
        }
        self.releasable(now_ts)
    }

    pub fn commit_revoke(&mut self, amount: u64) -> core::result::Result<(), LedgerError> {
        self.commit_release(amount)?;
        self.revoked = 1;
        Ok(())
    }
}

/// PDA holding the full schedules list (<= 5 entries, insertion order).
/// Entries are never deleted; a revoked or fully-vested schedule remains as
/// an audit record.
#[account]
#[repr(C)]
pub struct Schedules {
    pub entries: [ScheduleEntry; MAX_BENEFICIARIES],
}

impl Schedules {
    /// Space for discriminator + fixed entries array.
    pub const fn space() -> usize {
        8 + core::mem::size_of::<Schedules>()
    }

    pub fn find(&self, count: u8, beneficiary: &Pubkey) -> Option<&ScheduleEntry> {
        self.entries
            .iter()
            .take(count as usize)
            .find(|e| e.beneficiary == *beneficiary)
    }

    pub fn find_mut(&mut self, count: u8, beneficiary: &Pubkey) -> Option<&mut ScheduleEntry> {
        self.entries
            .iter_mut()
            .take(count as usize)
            .find(|e| e.beneficiary == *beneficiary)
    }

    /// Insert a fresh entry, enforcing the capacity cap and uniqueness.
    /// Returns the new schedule count.
    pub fn insert(&mut self, count: u8, entry: ScheduleEntry) -> core::result::Result<u8, LedgerError> {
        if (count as usize) >= MAX_BENEFICIARIES {
            return Err(LedgerError::LedgerFull);
        }
        if self.find(count, &entry.beneficiary).is_some() {
            return Err(LedgerError::DuplicateBeneficiary);
        }
        self.entries[count as usize] = entry;
        count.checked_add(1).ok_or(LedgerError::MathOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOTAL: u64 = 1_000;
    const CLIFF: u64 = 30;
    const DURATION: u64 = 100;
    const UNIT: u64 = 60;

    fn beneficiary(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn entry() -> ScheduleEntry {
        ScheduleEntry::new(beneficiary(1), CLIFF, DURATION, UNIT, TOTAL).unwrap()
    }

    fn empty_schedules() -> Schedules {
        Schedules {
            entries: [ScheduleEntry::default(); MAX_BENEFICIARIES],
        }
    }

    #[test]
    fn registration_validates_inputs() {
        assert!(matches!(
            ScheduleEntry::new(Pubkey::default(), CLIFF, DURATION, UNIT, TOTAL),
            Err(LedgerError::InvalidPubkey)
        ));
        assert!(matches!(
            ScheduleEntry::new(beneficiary(1), DURATION + 1, DURATION, UNIT, TOTAL),
            Err(LedgerError::InvalidSchedule)
        ));
        assert!(matches!(
            ScheduleEntry::new(beneficiary(1), CLIFF, DURATION, UNIT, 0),
            Err(LedgerError::InvalidSchedule)
        ));

        let e = entry();
        assert_eq!(e.released_amount, 0);
        assert_eq!(e.started, 0);
        assert_eq!(e.revoked, 0);
    }

    #[test]
    fn sixth_registration_overflows_the_ledger() {
        let mut schedules = empty_schedules();
        let mut count = 0;
        for n in 1..=5u8 {
            let e = ScheduleEntry::new(beneficiary(n), CLIFF, DURATION, UNIT, TOTAL).unwrap();
            count = schedules.insert(count, e).unwrap();
        }
        assert_eq!(count, 5);

        let sixth = ScheduleEntry::new(beneficiary(6), CLIFF, DURATION, UNIT, TOTAL).unwrap();
        assert!(matches!(
            schedules.insert(count, sixth),
            Err(LedgerError::LedgerFull)
        ));
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut schedules = empty_schedules();
        let count = schedules.insert(0, entry()).unwrap();
        assert!(matches!(
            schedules.insert(count, entry()),
            Err(LedgerError::DuplicateBeneficiary)
        ));
    }

    #[test]
    fn find_respects_the_live_count() {
        let schedules = empty_schedules();
        // A default entry sits at index 0 but count 0 means nothing is
        // registered, including the default pubkey.
        assert!(schedules.find(0, &Pubkey::default()).is_none());
        assert!(schedules.find(0, &beneficiary(1)).is_none());
    }

    #[test]
    fn activation_is_once_only() {
        let mut e = entry();
        assert_eq!(e.vested_amount(1_000_000).unwrap(), 0);

        e.activate(10_000).unwrap();
        assert_eq!(e.start_ts, 10_000);
        assert!(matches!(e.activate(20_000), Err(LedgerError::AlreadyStarted)));
    }

    #[test]
    fn release_guard_order() {
        let mut e = entry();
        assert!(matches!(e.prepare_release(0), Err(LedgerError::NotStarted)));

        e.activate(0).unwrap();
        let before_cliff = (CLIFF * UNIT - 1) as i64;
        assert!(matches!(
            e.prepare_release(before_cliff),
            Err(LedgerError::CliffNotReached)
        ));

        let past_cliff = (CLIFF * UNIT + 1) as i64;
        let payable = e.prepare_release(past_cliff).unwrap();
        assert_eq!(
            payable,
            TOTAL * (CLIFF * UNIT + 1) / (DURATION * UNIT)
        );

        e.commit_revoke(payable).unwrap();
        assert!(matches!(
            e.prepare_release(past_cliff),
            Err(LedgerError::ScheduleRevoked)
        ));
    }

    #[test]
    fn repeated_releases_accumulate_to_total() {
        let mut e = entry();
        e.activate(0).unwrap();
        let span = (DURATION * UNIT) as i64;
        let cliff = (CLIFF * UNIT) as i64;
        let step = (span - cliff) / 5;

        let mut paid = 0u64;
        for i in 0..=5 {
            let now = cliff + i * step;
            let payable = e.prepare_release(now).unwrap();
            e.commit_release(payable).unwrap();
            paid += payable;

            // Core invariant at every observation point.
            assert!(e.released_amount <= e.vested_amount(now).unwrap());
            assert!(e.vested_amount(now).unwrap() <= e.total_amount);
            assert_eq!(e.released_amount, paid);
        }
        assert_eq!(e.released_amount, TOTAL);

        // Fully released, past cliff, not revoked: release still succeeds
        // with a zero payable.
        assert_eq!(e.prepare_release(span + 1).unwrap(), 0);
    }

    #[test]
    fn revoke_pays_vested_minus_released_then_freezes() {
        let mut e = entry();
        assert!(matches!(e.prepare_revoke(0), Err(LedgerError::NotStarted)));

        e.activate(0).unwrap();
        let now = ((CLIFF + 20) * UNIT) as i64;

        let first = e.prepare_release(now).unwrap();
        e.commit_release(first).unwrap();

        let later = now + 10 * UNIT as i64;
        let vested = e.vested_amount(later).unwrap();
        let payout = e.prepare_revoke(later).unwrap();
        assert_eq!(payout, vested - first);

        e.commit_revoke(payout).unwrap();
        assert_eq!(e.released_amount, vested);
        assert!(matches!(
            e.prepare_revoke(later),
            Err(LedgerError::AlreadyRevoked)
        ));
        assert!(matches!(
            e.prepare_release(later),
            Err(LedgerError::ScheduleRevoked)
        ));
    }

    #[test]
    fn revoke_before_cliff_finalizes_with_zero_payout() {
        let mut e = entry();
        e.activate(0).unwrap();

        let before_cliff = (CLIFF * UNIT - 1) as i64;
        let payout = e.prepare_revoke(before_cliff).unwrap();
        assert_eq!(payout, 0);

        e.commit_revoke(payout).unwrap();
        assert_eq!(e.released_amount, 0);
        assert_eq!(e.revoked, 1);
        // The whole total_amount is left unvested in the vault for the admin
        // to sweep; the entry records that nothing was ever paid.
        assert_eq!(e.total_amount - e.released_amount, TOTAL);
    }

    #[test]
    fn revoked_remainder_matches_sweepable_amount() {
        let mut e = entry();
        e.activate(0).unwrap();
        let now = ((CLIFF + 20) * UNIT) as i64;

        let payout = e.prepare_revoke(now).unwrap();
        e.commit_revoke(payout).unwrap();

        let expected_vested = TOTAL * ((CLIFF + 20) * UNIT) / (DURATION * UNIT);
        assert_eq!(e.released_amount, expected_vested);
        assert_eq!(e.total_amount - e.released_amount, TOTAL - expected_vested);
    }
}
