//! Bindings for the contracts the ledger reads from.
//!
//! Every contract gets its own module named after it, containing everything
//! `alloy::sol!` generates plus an `Instance` alias bound to the type erased
//! provider used throughout the workspace. Addresses are not part of this
//! crate, they are configured per deployment.

pub use alloy::providers::DynProvider as Provider;

#[macro_export]
macro_rules! bindings {
    ($contract:ident { $($body:tt)* }) => {
        paste::paste! {
            // Generate the main bindings in a private module. That allows
            // us to re-export all items in our own module while also adding
            // some items ourselves.
            #[allow(non_snake_case)]
            mod [<$contract Private>] {
                alloy::sol! {
                    #[allow(missing_docs)]
                    #[sol(rpc)]
                    interface $contract {
                        $($body)*
                    }
                }
            }

            #[allow(non_snake_case)]
            pub mod $contract {
                pub use super::[<$contract Private>]::*;
                pub type Instance = $contract::[<$contract Instance>]<$crate::Provider>;
            }
        }
    };
}

bindings!(AxionToken {
    function totalSupply() external view returns (uint256);
});

bindings!(AxionStaking {
    event Stake(
        address indexed account,
        uint256 indexed sessionId,
        uint256 amount,
        uint256 start,
        uint256 end,
        uint256 shares
    );
    event Unstake(
        address indexed account,
        uint256 indexed sessionId,
        uint256 amount,
        uint256 start,
        uint256 end,
        uint256 shares
    );

    function shareRate() external view returns (uint256);
    function sharesTotalSupply() external view returns (uint256);
});

// The first auction deployment. Positions that were migrated forward still
// show up here, either with their original deposit or zeroed out.
bindings!(AuctionLegacy {
    function auctionsOf_(address account) external view returns (uint256[] memory);
    function auctionBetOf(uint256 auctionId, address account)
        external
        view
        returns (uint256 eth, address referrer);
});

bindings!(Auction {
    event Bid(
        address indexed account,
        uint256 value,
        uint256 indexed auctionId,
        uint256 indexed time
    );
    event Withdraval(
        address indexed account,
        uint256 value,
        uint256 indexed auctionId,
        uint256 indexed time,
        uint256 stakeDays
    );

    function reservesOf(uint256 auctionId)
        external
        view
        returns (
            uint256 eth,
            uint256 token,
            uint256 uniswapLastPrice,
            uint256 uniswapMiddlePrice
        );
    function calculateStepsFromStart() external view returns (uint256);
    function calculateNearestWeeklyAuction() external view returns (uint256);
    function getUniswapMiddlePriceForSevenDays() external view returns (uint256);
    function auctionsOf_(address account) external view returns (uint256[] memory);
    function auctionBidOf(uint256 auctionId, address account)
        external
        view
        returns (uint256 eth, address referrer, bool withdrawn, uint256 autoStakeDays);
});

bindings!(BigPayDay {
    function getClosestPoolAmount() external view returns (uint256);
    function getPoolYearAmounts() external view returns (uint256[5] memory);
});

bindings!(IUniswapV2Pair {
    function getReserves()
        external
        view
        returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
});
