//! One extractor per activity category.
//!
//! An extractor returns `None` when a field its category needs is missing. The
//! assembler then shows the record as `Unknown` instead of dropping it.

use crate::models::{NftSummary, ServiceProvider, TradeType, TransactionTypeInfo, TransferredAsset};
use crate::parsing::payload::{Asset, AssetChange, FiatOnRampTransaction, OnRampTransfer, ServiceProviderInfo, TradingApiOrder};
use crate::types::{normalize_for_chain, to_raw_amount, Address, Chain, CurrencyId, TokenStandard};

const TOKEN_TRANSFER: &str = "TokenTransfer";
const NFT_TRANSFER: &str = "NftTransfer";
const TOKEN_APPROVAL: &str = "TokenApproval";
const UNLIMITED_APPROVAL: &str = "INF";

/// Record-level facts every extractor may need.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionContext<'a> {
    pub chain: Chain,
    pub owner: &'a Address
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    In,
    Out
}

pub fn extract_send(changes: &[&AssetChange], context: &ExtractionContext) -> Option<TransactionTypeInfo> {
    let change = first_transfer(changes)?;
    let recipient = Address::parse(change.recipient.as_deref()?)?;
    let asset = transferred_asset(change, context.chain)?;

    Some(TransactionTypeInfo::Send { recipient, asset })
}

pub fn extract_receive(changes: &[&AssetChange], context: &ExtractionContext) -> Option<TransactionTypeInfo> {
    let change = first_transfer(changes)?;
    let sender = Address::parse(change.sender.as_deref()?)?;
    let asset = transferred_asset(change, context.chain)?;

    Some(TransactionTypeInfo::Receive { sender, asset })
}

pub fn extract_approve(changes: &[&AssetChange], context: &ExtractionContext) -> Option<TransactionTypeInfo> {
    let change = changes.iter().copied().find(|change| is_typename(change, TOKEN_APPROVAL))?;
    let asset = change.asset.as_ref()?;
    let standard = change.token_standard.as_deref().map_or(Some(TokenStandard::Erc20), TokenStandard::parse)?;
    let token = normalize_for_chain(context.chain, standard, asset.address.as_deref())?;
    let spender = Address::parse(change.approved_address.as_deref()?)?;

    let approval_amount = change.quantity.as_deref().and_then(|quantity| {
        if quantity.trim().eq_ignore_ascii_case("inf") {
            Some(UNLIMITED_APPROVAL.to_string())
        } else {
            to_raw_amount(quantity, asset.decimals)
        }
    });

    Some(TransactionTypeInfo::Approve {
        token_address: token.address,
        spender,
        approval_amount
    })
}

/// Swaps between two fungible tokens, wraps of the native currency, and NFT purchases or sales.
pub fn extract_swap(changes: &[&AssetChange], context: &ExtractionContext) -> Option<TransactionTypeInfo> {
    let sent_token = find_transfer(changes, TOKEN_TRANSFER, Direction::Out, context.owner);
    let received_token = find_transfer(changes, TOKEN_TRANSFER, Direction::In, context.owner);
    let sent_nft = find_transfer(changes, NFT_TRANSFER, Direction::Out, context.owner);
    let received_nft = find_transfer(changes, NFT_TRANSFER, Direction::In, context.owner);

    if let (Some(nft), Some(payment)) = (received_nft, sent_token) {
        return nft_trade(TradeType::Buy, nft, payment, context.chain);
    }

    if let (Some(nft), Some(payment)) = (sent_nft, received_token) {
        return nft_trade(TradeType::Sell, nft, payment, context.chain);
    }

    let (input_currency_id, input_currency_amount_raw) = currency_amount(sent_token?, context.chain)?;
    let (output_currency_id, output_currency_amount_raw) = currency_amount(received_token?, context.chain)?;

    if input_currency_id.is_native() && output_currency_id.is_wrapped_native() {
        return Some(TransactionTypeInfo::Wrap { unwrapped: false, currency_amount_raw: input_currency_amount_raw });
    }

    if input_currency_id.is_wrapped_native() && output_currency_id.is_native() {
        return Some(TransactionTypeInfo::Wrap { unwrapped: true, currency_amount_raw: input_currency_amount_raw });
    }

    Some(TransactionTypeInfo::Swap {
        input_currency_id,
        output_currency_id,
        input_currency_amount_raw,
        output_currency_amount_raw
    })
}

/// A mint needs the incoming NFT; the payment is optional since free mints exist.
pub fn extract_nft_mint(changes: &[&AssetChange], context: &ExtractionContext) -> Option<TransactionTypeInfo> {
    let minted = find_transfer(changes, NFT_TRANSFER, Direction::In, context.owner)?;
    let nft_summary = nft_summary(minted.asset.as_ref()?)?;

    let payment = find_transfer(changes, TOKEN_TRANSFER, Direction::Out, context.owner)
        .and_then(|payment| currency_amount(payment, context.chain));

    let (purchase_currency_id, purchase_currency_amount_raw) = payment.unzip();

    Some(TransactionTypeInfo::NftMint {
        nft_summary,
        purchase_currency_id,
        purchase_currency_amount_raw
    })
}

/// Purchase when the provider reports what the user paid, transfer otherwise.
///
/// The provider protocol has no explicit discriminant: the presence of both
/// `sourceCurrency` and `sourceAmount` is the only signal.
pub fn extract_on_ramp(transfer: &OnRampTransfer, context: &ExtractionContext) -> Option<TransactionTypeInfo> {
    let id = transfer.transaction_reference_id.clone()?;
    let token = transfer.token.as_ref()?;
    let standard = transfer.token_standard.as_deref().map_or(Some(TokenStandard::Erc20), TokenStandard::parse)?;
    let destination_token_address = normalize_for_chain(context.chain, standard, token.address.as_deref())?.address;
    let destination_token_amount = transfer.amount?;
    let service_provider = service_provider(transfer.service_provider.as_ref()?)?;
    let destination_token_symbol = token.symbol.clone();

    match (transfer.source_currency.clone(), transfer.source_amount) {
        (Some(source_currency), Some(source_amount)) => Some(TransactionTypeInfo::OnRampPurchase {
            id,
            destination_token_symbol,
            destination_token_address,
            destination_token_amount,
            service_provider,
            source_currency,
            source_amount
        }),
        _ => Some(TransactionTypeInfo::OnRampTransfer {
            id,
            destination_token_symbol,
            destination_token_address,
            destination_token_amount,
            service_provider
        })
    }
}

pub fn extract_fiat_purchase(transaction: &FiatOnRampTransaction, context: &ExtractionContext) -> Option<TransactionTypeInfo> {
    let id = transaction.external_session_id.clone()?;
    let service_provider = transaction.service_provider.clone()?;

    let output_currency_id = transaction.destination_contract_address.as_deref()
        .and_then(|address| normalize_for_chain(context.chain, TokenStandard::Erc20, Some(address)));

    Some(TransactionTypeInfo::FiatPurchase {
        id,
        input_currency_code: transaction.source_currency_code.clone(),
        input_currency_amount: transaction.source_amount,
        output_currency_id,
        output_currency_amount: transaction.destination_amount,
        service_provider,
        synced_with_backend: true
    })
}

/// Settled amounts win over the amounts the order was opened with.
pub fn extract_trading_api_swap(order: &TradingApiOrder, context: &ExtractionContext) -> Option<TransactionTypeInfo> {
    let input = order.input.as_ref()?;
    let output = order.outputs.as_ref()?.first()?;
    let settled = order.settled_amounts.as_ref().and_then(|amounts| amounts.first());

    let input_currency_id = normalize_for_chain(context.chain, TokenStandard::Erc20, input.token.as_deref())?;
    let output_currency_id = normalize_for_chain(context.chain, TokenStandard::Erc20, output.token.as_deref())?;

    let input_amount = settled.and_then(|settled| settled.amount_in.as_deref()).or(input.start_amount.as_deref())?;
    let output_amount = settled.and_then(|settled| settled.amount_out.as_deref()).or(output.start_amount.as_deref())?;

    Some(TransactionTypeInfo::Swap {
        input_currency_id,
        output_currency_id,
        input_currency_amount_raw: to_raw_amount(input_amount, None)?,
        output_currency_amount_raw: to_raw_amount(output_amount, None)?
    })
}

fn first_transfer<'a>(changes: &[&'a AssetChange]) -> Option<&'a AssetChange> {
    changes.iter().copied().find(|change| is_typename(change, TOKEN_TRANSFER) || is_typename(change, NFT_TRANSFER))
}

fn find_transfer<'a>(changes: &[&'a AssetChange], typename: &str, direction: Direction, owner: &Address) -> Option<&'a AssetChange> {
    changes.iter().copied().find(|change| is_typename(change, typename) && direction_of(change, owner) == Some(direction))
}

/// Uses the reported direction, falling back to comparing sender and recipient with the wallet.
fn direction_of(change: &AssetChange, owner: &Address) -> Option<Direction> {
    match change.direction.as_deref().map(str::trim) {
        Some(direction) if direction.eq_ignore_ascii_case("IN") => return Some(Direction::In),
        Some(direction) if direction.eq_ignore_ascii_case("OUT") => return Some(Direction::Out),
        _ => {}
    }

    let is_owner = |value: &Option<String>| value.as_deref().and_then(Address::parse).as_ref() == Some(owner);

    if is_owner(&change.sender) {
        Some(Direction::Out)
    } else if is_owner(&change.recipient) {
        Some(Direction::In)
    } else {
        None
    }
}

fn is_typename(change: &AssetChange, typename: &str) -> bool {
    change.typename.as_deref() == Some(typename)
}

fn transferred_asset(change: &AssetChange, chain: Chain) -> Option<TransferredAsset> {
    if is_typename(change, NFT_TRANSFER) {
        let nft_summary = nft_summary(change.asset.as_ref()?)?;
        let token_address = nft_summary.address.clone();

        return match TokenStandard::parse(change.nft_standard.as_deref()?)? {
            TokenStandard::Erc721 => Some(TransferredAsset::Erc721 { token_address, nft_summary }),
            TokenStandard::Erc1155 => Some(TransferredAsset::Erc1155 { token_address, nft_summary }),
            _ => None
        };
    }

    let (currency, currency_amount_raw) = currency_amount(change, chain)?;

    Some(TransferredAsset::Currency {
        token_address: currency.address,
        currency_amount_raw
    })
}

fn currency_amount(change: &AssetChange, chain: Chain) -> Option<(CurrencyId, String)> {
    let asset = change.asset.as_ref();
    let standard = TokenStandard::parse(change.token_standard.as_deref()?)?;

    if !standard.is_fungible() {
        return None;
    }

    let currency = normalize_for_chain(chain, standard, asset.and_then(|asset| asset.address.as_deref()))?;
    let amount = to_raw_amount(change.quantity.as_deref()?, asset.and_then(|asset| asset.decimals))?;

    Some((currency, amount))
}

fn nft_trade(trade_type: TradeType, nft: &AssetChange, payment: &AssetChange, chain: Chain) -> Option<TransactionTypeInfo> {
    let nft_summary = nft_summary(nft.asset.as_ref()?)?;
    let (purchase_currency_id, purchase_currency_amount_raw) = currency_amount(payment, chain)?;

    Some(TransactionTypeInfo::NftTrade {
        trade_type,
        nft_summary,
        purchase_currency_id,
        purchase_currency_amount_raw
    })
}

fn nft_summary(asset: &Asset) -> Option<NftSummary> {
    let contract = asset.nft_contract.as_ref().and_then(|contract| contract.address.as_deref());
    let address = Address::parse(contract.or(asset.address.as_deref())?)?;

    Some(NftSummary {
        name: asset.name.clone(),
        collection_name: asset.collection.as_ref().and_then(|collection| collection.name.clone()),
        image_url: asset.image.as_ref().and_then(|image| image.url.clone()),
        token_id: asset.token_id.clone()?,
        address
    })
}

fn service_provider(info: &ServiceProviderInfo) -> Option<ServiceProvider> {
    Some(ServiceProvider {
        id: info.service_provider.clone()?,
        name: info.name.clone(),
        url: info.url.clone(),
        logo_light_url: info.logo_light_url.clone(),
        logo_dark_url: info.logo_dark_url.clone(),
        support_url: info.support_url.clone()
    })
}
