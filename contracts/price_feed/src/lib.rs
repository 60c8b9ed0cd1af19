#![cfg_attr(not(feature = "std"), no_std, no_main)]

/// # Price Feed
///
/// Deployable USD quote feed consumed by the funding contract.
///
/// Holds one quote: the USD price of a single native unit, together with the
/// decimal precision of that price. `decimals` is fixed at deployment;
/// `price` can be re-quoted by the feed owner. Consumers read the pair in one
/// call via `get_price`.
///
/// **Compatibility:** ink! v5.
#[ink::contract]
mod price_feed {

    // =========================================================================
    // CONSTANTS
    // =========================================================================

    /// Interface version reported by `version()`.
    pub const FEED_VERSION: u32 = 0;

    // =========================================================================
    // STORAGE
    // =========================================================================

    #[ink(storage)]
    pub struct PriceFeed {
        /// Deployer; the only identity allowed to re-quote.
        owner: AccountId,
        /// Current USD price of one native unit, at `decimals` precision.
        price: Balance,
        /// Decimal precision of `price`. Fixed at deployment.
        decimals: u8,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Emitted on every owner re-quote.
    #[ink(event)]
    pub struct PriceUpdated {
        previous: Balance,
        updated: Balance,
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    #[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        /// Caller is not the feed owner.
        NotOwner,
    }

    // =========================================================================
    // IMPLEMENTATION
    // =========================================================================

    impl PriceFeed {
        /// Deploy the feed with its initial quote.
        ///
        /// The deploying caller becomes the feed owner.
        #[ink(constructor)]
        pub fn new(price: Balance, decimals: u8) -> Self {
            Self {
                owner: Self::env().caller(),
                price,
                decimals,
            }
        }

        /// Current quote: `(price, decimals)`.
        #[ink(message)]
        pub fn get_price(&self) -> (Balance, u8) {
            (self.price, self.decimals)
        }

        /// Decimal precision of the quoted price.
        #[ink(message)]
        pub fn decimals(&self) -> u8 {
            self.decimals
        }

        /// Feed interface version.
        #[ink(message)]
        pub fn version(&self) -> u32 {
            FEED_VERSION
        }

        /// Feed owner.
        #[ink(message)]
        pub fn get_owner(&self) -> AccountId {
            self.owner
        }

        /// Replace the quoted price. Owner only; `decimals` never changes.
        #[ink(message)]
        pub fn set_price(&mut self, new_price: Balance) -> Result<(), Error> {
            self.ensure_owner()?;

            let previous = self.price;
            self.price = new_price;

            self.env().emit_event(PriceUpdated {
                previous,
                updated: new_price,
            });

            Ok(())
        }

        fn ensure_owner(&self) -> Result<(), Error> {
            if self.env().caller() != self.owner {
                return Err(Error::NotOwner);
            }
            Ok(())
        }
    }

    // =========================================================================
    // TESTS
    // =========================================================================

}
