#![cfg_attr(not(feature = "std"), no_std, no_main)]

/// Interface the funding contract expects from its price feed.
///
/// The feed is addressed by selector at call time; any contract answering
/// `get_price` with a `(price, decimals)` pair satisfies it.
#[ink::trait_definition]
pub trait PriceFeedInterface {
    /// Current USD price of one native unit, with its decimal precision.
    #[ink(message)]
    fn get_price(&self) -> (u128, u8);
}

/// # FundMe
///
/// Crowdfunding ledger with a USD floor on contributions.
///
/// ```text
/// caller ──fund() + value──► [FundMe] ──get_price() XCC──► [PriceFeed]
/// owner  ──withdraw()──────► ledger reset, then full-balance sweep
/// ```
///
/// ## Responsibilities
///
/// 1. **Contribution intake** — `fund()` is payable and open to any caller.
///    The attached value is converted to USD at the feed's live quote and
///    rejected below the 50 USD minimum; a rejected call reverts whole, so
///    the attached value returns to the caller.
///
/// 2. **Ledger** — cumulative contribution totals per identity, plus the
///    funder sequence in call order (one entry per accepted call, repeat
///    funders included). Both grow only through `fund` and are cleared only
///    by a successful `withdraw`.
///
/// 3. **Owner sweep** — `withdraw()` is gated to the deploying owner. The
///    ledger is reset before the outbound transfer, so a call re-entering
///    during the transfer observes the post-withdrawal state; a failed
///    transfer reverts the reset along with the rest of the call.
///
/// The feed address is bound at construction and immutable. Without a feed
/// (devnet mode) the contract answers price queries from the built-in devnet
/// quote so the whole funding path can be exercised locally.
///
/// **Compatibility:** ink! v5.
#[ink::contract]
mod fund_me {
    use ink::env::call::{build_call, ExecutionInput, Selector};
    use ink::prelude::vec::Vec;
    use ink::storage::Mapping;

    // =========================================================================
    // CONSTANTS
    // =========================================================================

    /// 18-decimal precision base shared by native units and USD values.
    pub const PRICE_PRECISION: u128 = 1_000_000_000_000_000_000;

    /// Minimum accepted contribution: 50 USD at 18-decimal precision.
    pub const MINIMUM_USD: u128 = 50 * PRICE_PRECISION;

    /// Devnet quote: 2 000.00000000 USD per native unit.
    pub const DEVNET_PRICE: u128 = 200_000_000_000;

    /// Decimal precision of [`DEVNET_PRICE`].
    pub const DEVNET_PRICE_DECIMALS: u8 = 8;

    // =========================================================================
    // STORAGE
    // =========================================================================

    #[ink(storage)]
    pub struct FundMe {
        // ── Access control ───────────────────────────────────────────────
        /// Deployer; the only identity allowed to withdraw.
        owner: AccountId,

        // ── Price feed ───────────────────────────────────────────────────
        /// Feed contract answering `get_price`; `None` selects devnet mode.
        /// Bound at construction, never reassigned.
        price_feed: Option<AccountId>,

        // ── Ledger ───────────────────────────────────────────────────────
        /// Cumulative contribution per identity, in native base units.
        ledger: Mapping<AccountId, Balance>,
        /// Funder sequence in call order. Appended on every accepted `fund`,
        /// so a repeat funder appears once per call.
        funders: Vec<AccountId>,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Emitted on every accepted contribution.
    #[ink(event)]
    pub struct Funded {
        #[ink(topic)]
        funder: AccountId,
        amount: Balance,
        usd_value: Balance,
    }

    /// Emitted when the owner sweeps the held balance.
    #[ink(event)]
    pub struct Withdrawn {
        #[ink(topic)]
        owner: AccountId,
        amount: Balance,
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    #[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        /// Attached value converts to less than the 50 USD minimum.
        InsufficientValue,
        /// Caller is not the contract owner.
        NotOwner,
        /// Arithmetic overflow in conversion or accumulation.
        Overflow,
        /// The outbound native transfer to the owner failed.
        TransferFailed,
        /// Funder index is past the end of the funder sequence.
        IndexOutOfBounds,
        /// The price feed call failed or returned an undecodable quote.
        PriceFeedUnavailable,
    }

    // =========================================================================
    // PRICE CONVERSION
    // =========================================================================

    /// USD value of `amount` native base units at the quoted price.
    ///
    /// `usd = amount × price / 10^decimals`, multiplying before dividing so
    /// sub-unit amounts lose nothing to truncation. The result keeps the
    /// 18-decimal base of `amount`. `None` on overflow, including a
    /// `decimals` whose power does not fit the balance width.
    pub fn usd_value(amount: Balance, price: Balance, decimals: u8) -> Option<Balance> {
        let scale = 10u128.checked_pow(decimals as u32)?;
        amount.checked_mul(price)?.checked_div(scale)
    }

    // =========================================================================
    // IMPLEMENTATION
    // =========================================================================

    impl FundMe {
        // ---------------------------------------------------------------------
        // Constructors
        // ---------------------------------------------------------------------

        /// Deploy against a live price feed.
        ///
        /// The deploying caller becomes the owner. The feed address is fixed
        /// for the contract's lifetime.
        #[ink(constructor)]
        pub fn new(price_feed: AccountId) -> Self {
            Self::with_feed(Some(price_feed))
        }

        /// Deploy in devnet mode: no external feed, quotes answered from the
        /// built-in devnet constants.
        #[ink(constructor)]
        pub fn devnet() -> Self {
            Self::with_feed(None)
        }

        fn with_feed(price_feed: Option<AccountId>) -> Self {
            Self {
                owner: Self::env().caller(),
                price_feed,
                ledger: Mapping::default(),
                funders: Vec::new(),
            }
        }

        // =====================================================================
        // FUNDING
        // =====================================================================

        /// Contribute the attached value.
        ///
        /// The value is converted to USD at the feed's current quote and must
        /// meet the 50 USD minimum. On acceptance the caller's cumulative
        /// total grows by the attached amount and the caller is appended to
        /// the funder sequence.
        ///
        /// # Errors
        /// - [`Error::InsufficientValue`] — below the minimum; the call
        ///   reverts and the attached value returns to the caller.
        /// - [`Error::PriceFeedUnavailable`] — the live quote could not be
        ///   read.
        /// - [`Error::Overflow`] — conversion or accumulation overflowed.
        #[ink(message, payable)]
        pub fn fund(&mut self) -> Result<(), Error> {
            let funder = self.env().caller();
            let amount = self.env().transferred_value();

            let (price, decimals) = self.latest_quote()?;
            let usd = usd_value(amount, price, decimals).ok_or(Error::Overflow)?;
            if usd < MINIMUM_USD {
                return Err(Error::InsufficientValue);
            }

            self.record_contribution(funder, amount)?;

            self.env().emit_event(Funded {
                funder,
                amount,
                usd_value: usd,
            });

            Ok(())
        }

        // =====================================================================
        // WITHDRAWAL
        // =====================================================================

        /// Sweep the entire held balance to the owner and reset the ledger.
        ///
        /// Owner only. The ledger reset is committed before the outbound
        /// transfer, so a call re-entering during the transfer finds every
        /// total at zero and an empty funder sequence. A failed transfer
        /// fails the whole call; the reset does not survive it.
        ///
        /// Returns the swept amount.
        #[ink(message)]
        pub fn withdraw(&mut self) -> Result<Balance, Error> {
            self.ensure_owner()?;

            let amount = self.env().balance();

            // Effects before interaction: clear the ledger, then move value.
            self.reset_ledger();

            self.env()
                .transfer(self.owner, amount)
                .map_err(|_| Error::TransferFailed)?;

            self.env().emit_event(Withdrawn {
                owner: self.owner,
                amount,
            });

            Ok(amount)
        }

        // =====================================================================
        // INTERNALS
        // =====================================================================

        /// Current `(price, decimals)` quote for one native unit in USD.
        ///
        /// Live mode reads the configured feed at call time; nothing is
        /// cached between calls. Devnet mode answers the built-in quote.
        fn latest_quote(&self) -> Result<(Balance, u8), Error> {
            let feed = match self.price_feed {
                Some(feed) => feed,
                None => return Ok((DEVNET_PRICE, DEVNET_PRICE_DECIMALS)),
            };

            let call = build_call::<ink::env::DefaultEnvironment>()
                .call(feed)
                .exec_input(ExecutionInput::new(Selector::new(ink::selector_bytes!(
                    "get_price"
                ))))
                .returns::<(Balance, u8)>()
                .try_invoke();

            match call {
                Ok(Ok(quote)) => Ok(quote),
                _ => Err(Error::PriceFeedUnavailable),
            }
        }

        /// Add `amount` to `funder`'s total and append to the funder
        /// sequence. Fails on accumulation overflow with nothing recorded.
        fn record_contribution(&mut self, funder: AccountId, amount: Balance) -> Result<(), Error> {
            let previous = self.ledger.get(funder).unwrap_or(0);
            let updated = previous.checked_add(amount).ok_or(Error::Overflow)?;

            self.ledger.insert(funder, &updated);
            self.funders.push(funder);

            Ok(())
        }

        /// Zero every listed contributor's total, then empty the sequence.
        fn reset_ledger(&mut self) {
            for funder in self.funders.iter() {
                self.ledger.remove(funder);
            }
            self.funders = Vec::new();
        }

        fn ensure_owner(&self) -> Result<(), Error> {
            if self.env().caller() != self.owner {
                return Err(Error::NotOwner);
            }
            Ok(())
        }

        // =====================================================================
        // VIEW FUNCTIONS
        // =====================================================================

        /// Cumulative contribution of `identity`; 0 if it never funded.
        #[ink(message)]
        pub fn get_contribution(&self, identity: AccountId) -> Balance {
            self.ledger.get(identity).unwrap_or(0)
        }

        /// Funder sequence entry at `index`.
        ///
        /// Hard failure past the end of the sequence, an empty post-withdraw
        /// sequence included.
        #[ink(message)]
        pub fn get_funder_at(&self, index: u32) -> Result<AccountId, Error> {
            self.funders
                .get(index as usize)
                .copied()
                .ok_or(Error::IndexOutOfBounds)
        }

        /// Length of the funder sequence.
        #[ink(message)]
        pub fn get_funders_count(&self) -> u32 {
            self.funders.len() as u32
        }

        /// Contract owner.
        #[ink(message)]
        pub fn get_owner(&self) -> AccountId {
            self.owner
        }

        /// Configured price feed; `None` in devnet mode.
        #[ink(message)]
        pub fn get_price_feed(&self) -> Option<AccountId> {
            self.price_feed
        }

        /// Minimum accepted contribution in USD, 18-decimal precision.
        #[ink(message)]
        pub fn get_minimum_usd(&self) -> Balance {
            MINIMUM_USD
        }
    }

    // =========================================================================
    // TESTS
    // =========================================================================

}
