//! Solidity interfaces of the two sale contracts

use alloy_sol_types::sol;

sol! {
    /// ERC-20 token that also sells itself and pays out NFT holders.
    interface ICryptoDevToken {
        function owner() external view returns (address);
        function balanceOf(address account) external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function tokenIdsClaimed(uint256 id) external view returns (bool);
        function claim() external;
        function mint(uint256 amount) external payable;
        function withdraw() external;
    }

    /// Enumerable ERC-721 whose holders may claim tokens.
    interface ICryptoDevs {
        function balanceOf(address owner) external view returns (uint256);
        function tokenOfOwnerByIndex(address owner, uint256 index) external view returns (uint256);
    }
}
