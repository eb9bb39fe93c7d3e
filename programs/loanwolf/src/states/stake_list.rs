// states/stake_list.rs
use anchor_lang::prelude::*;
use crate::constants::{MAX_STAKE_SLOTS, NIL};
use crate::errors::LoanError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct StakeEntry {
    pub loan_id: u64,
    pub amount: u64,
    pub stake_start_time: i64,
    pub next: u32,                // slot of the next entry (or next free slot), NIL at the end
    pub occupied: bool,
}

/// What `get_staking_at` hands to clients. Slot links stay internal.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakingView {
    pub loan_id: u64,
    pub amount: u64,
    pub stake_start_time: i64,
    pub has_next: bool,
}

/// Per-owner singly linked list of stakes, newest first.
///
/// Entries live in `slots` and link to each other by slot number. Removed slots go
/// onto a free list and are reused before the account is grown.
///
/// The whole arena is deserialized onto the heap by every instruction touching the
/// list, so it stops growing at `MAX_STAKE_SLOTS` live entries.
#[account]
#[derive(Debug)]
pub struct StakeList {
    pub owner: Pubkey,
    pub head: u32,
    pub free: u32,
    pub len: u32,
    pub bump: u8,
    pub slots: Vec<StakeEntry>,
}

impl StakeList {
    const FIXED_SPACE: usize =
        32 +    // Pubkey (owner)
        4 +     // u32 (head)
        4 +     // u32 (free)
        4 +     // u32 (len)
        1 +     // u8 (bump)
        4;      // Vec length prefix

    /// Account space (without discriminator) for a list with `slots` slots.
    pub fn space(slots: usize) -> usize {
        Self::FIXED_SPACE + slots * StakeEntry::INIT_SPACE
    }

    /// Slot count once the next `push` has happened.
    pub fn slots_after_push(&self) -> usize {
        (self.slots.len() + usize::from(self.free == NIL)).min(MAX_STAKE_SLOTS)
    }

    pub fn init(&mut self, owner: Pubkey, bump: u8) {
        self.owner = owner;
        self.head = NIL;
        self.free = NIL;
        self.len = 0;
        self.bump = bump;
        self.slots = Vec::new();
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a new stake at the head. Returns the slot it landed in.
    pub fn push(&mut self, loan_id: u64, amount: u64, now: i64) -> Result<u32> {
        require!(amount > 0, LoanError::InvalidAmount);
        let len = self.len.checked_add(1).ok_or(LoanError::MathOverflow)?;

        let entry = StakeEntry {
            loan_id,
            amount,
            stake_start_time: now,
            next: self.head,
            occupied: true,
        };

        let slot = if self.free != NIL {
            let slot = self.free;
            self.free = self.slots[slot as usize].next;
            self.slots[slot as usize] = entry;
            slot
        } else {
            require!(self.slots.len() < MAX_STAKE_SLOTS, LoanError::StakeListFull);
            let slot = u32::try_from(self.slots.len()).map_err(|_| error!(LoanError::MathOverflow))?;
            self.slots.push(entry);
            slot
        };

        self.head = slot;
        self.len = len;
        Ok(slot)
    }

    /// Walks to `index` (0 = head). Returns (predecessor slot, slot).
    fn locate(&self, index: u64) -> Result<(u32, u32)> {
        require!(index < self.len as u64, LoanError::InvalidIndex);

        let mut prev = NIL;
        let mut slot = self.head;
        for _ in 0..index {
            require!(slot != NIL, LoanError::InvalidIndex);
            prev = slot;
            slot = self.slots[slot as usize].next;
        }
        require!(slot != NIL, LoanError::InvalidIndex);

        Ok((prev, slot))
    }

    pub fn entry_at(&self, index: u64) -> Result<&StakeEntry> {
        let (_, slot) = self.locate(index)?;
        Ok(&self.slots[slot as usize])
    }

    pub fn staking_at(&self, index: u64) -> Result<StakingView> {
        let entry = self.entry_at(index)?;
        Ok(StakingView {
            loan_id: entry.loan_id,
            amount: entry.amount,
            stake_start_time: entry.stake_start_time,
            has_next: entry.next != NIL,
        })
    }

    /// Unlinks the entry at `index` and returns it. The slot is recycled.
    pub fn remove(&mut self, index: u64) -> Result<StakeEntry> {
        let (prev, slot) = self.locate(index)?;
        let removed = self.slots[slot as usize];

        if prev == NIL {
            self.head = removed.next;
        } else {
            self.slots[prev as usize].next = removed.next;
        }

        let freed = &mut self.slots[slot as usize];
        freed.occupied = false;
        freed.amount = 0;
        freed.next = self.free;
        self.free = slot;
        self.len -= 1;

        Ok(removed)
    }

    /// Entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = &StakeEntry> + '_ {
        let mut slot = self.head;
        std::iter::from_fn(move || {
            if slot == NIL {
                return None;
            }
            let entry = &self.slots[slot as usize];
            slot = entry.next;
            Some(entry)
        })
    }

    pub fn staked_for(&self, loan_id: u64) -> u64 {
        self.iter()
            .filter(|entry| entry.loan_id == loan_id)
            .map(|entry| entry.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> StakeList {
        let mut list = StakeList {
            owner: Pubkey::default(),
            head: 0,
            free: 0,
            len: 0,
            bump: 0,
            slots: vec![],
        };
        list.init(Pubkey::new_unique(), 1);
        list
    }

    fn amounts(list: &StakeList) -> Vec<u64> {
        list.iter().map(|e| e.amount).collect()
    }

    fn err(code: LoanError) -> anchor_lang::error::Error {
        code.into()
    }

    #[test]
    fn newest_stake_is_index_zero() {
        let mut list = list();
        list.push(1, 10, 100).unwrap();
        list.push(1, 20, 101).unwrap();
        list.push(2, 30, 102).unwrap();

        assert_eq!(amounts(&list), vec![30, 20, 10]);
        assert_eq!(
            list.staking_at(0).unwrap(),
            StakingView { loan_id: 2, amount: 30, stake_start_time: 102, has_next: true }
        );
        assert!(!list.staking_at(2).unwrap().has_next);
        assert_eq!(list.staking_at(3).unwrap_err(), err(LoanError::InvalidIndex));
    }

    #[test]
    fn remove_relinks_head_middle_and_tail() {
        let mut list = list();
        for amount in [1, 2, 3, 4] {
            list.push(7, amount, 0).unwrap();
        }
        assert_eq!(amounts(&list), vec![4, 3, 2, 1]);

        assert_eq!(list.remove(1).unwrap().amount, 3);
        assert_eq!(amounts(&list), vec![4, 2, 1]);

        assert_eq!(list.remove(0).unwrap().amount, 4);
        assert_eq!(amounts(&list), vec![2, 1]);

        assert_eq!(list.remove(1).unwrap().amount, 1);
        assert_eq!(amounts(&list), vec![2]);
        assert_eq!(list.len, 1);

        assert_eq!(list.remove(1).unwrap_err(), err(LoanError::InvalidIndex));
        assert_eq!(list.remove(0).unwrap().amount, 2);
        assert!(list.is_empty());
        assert_eq!(list.head, NIL);
    }

    #[test]
    fn freed_slots_are_reused_before_growing() {
        let mut list = list();
        list.push(1, 10, 0).unwrap();
        list.push(1, 20, 0).unwrap();
        assert_eq!(list.slots_after_push(), 3);

        list.remove(1).unwrap();
        assert_eq!(list.slots_after_push(), 2);

        let slot = list.push(1, 30, 5).unwrap();
        assert_eq!(slot, 0);
        assert_eq!(list.slots.len(), 2);
        assert_eq!(amounts(&list), vec![30, 20]);
        assert_eq!(list.entry_at(0).unwrap().stake_start_time, 5);
    }

    #[test]
    fn reads_do_not_mutate() {
        let mut list = list();
        list.push(4, 25, 9).unwrap();
        let before = list.slots.clone();

        let first = list.staking_at(0).unwrap();
        let second = list.staking_at(0).unwrap();
        assert_eq!(first, second);
        assert_eq!(list.slots, before);
    }

    #[test]
    fn staked_totals_are_per_loan() {
        let mut list = list();
        list.push(1, 10, 0).unwrap();
        list.push(2, 5, 0).unwrap();
        list.push(1, 15, 0).unwrap();
        assert_eq!(list.staked_for(1), 25);
        assert_eq!(list.staked_for(2), 5);
        assert_eq!(list.staked_for(3), 0);
    }

    #[test]
    fn full_list_rejects_new_slots_until_one_is_freed() {
        let mut list = list();
        for n in 0..MAX_STAKE_SLOTS as u64 {
            list.push(1, n + 1, 0).unwrap();
        }
        assert_eq!(list.slots_after_push(), MAX_STAKE_SLOTS);
        assert_eq!(list.push(1, 5, 0).unwrap_err(), err(LoanError::StakeListFull));
        assert_eq!(list.len as usize, MAX_STAKE_SLOTS);

        list.remove(3).unwrap();
        list.push(1, 5, 9).unwrap();
        assert_eq!(list.slots.len(), MAX_STAKE_SLOTS);
        assert_eq!(list.staking_at(0).unwrap().amount, 5);
    }

    #[test]
    fn zero_stake_is_rejected() {
        let mut list = list();
        assert_eq!(list.push(1, 0, 0).unwrap_err(), err(LoanError::InvalidAmount));
        assert!(list.is_empty());
    }
}
