use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::request::{Extractor, Request};
use crate::types::scale::{self, AutoScale};
use crate::types::{
    AmendOrderRequest, AssignPositionBalanceRequest, BulkCancelOrderRequest,
    CancelAllOrdersRequest, CancelOrderRequest, ClosedOrder, ClosedOrdersRequest, ClosedPosition,
    ClosedPositionRequest, FundingFeeItem, FundingFeeRequest, FundingRateItem, FundingRateRequest,
    Kline, KlineRequest, OpenOrder, OrderBookResponse, OrderHistoryItem, OrderRequest,
    OrderResponse, PositionResponse, PositionsWithPnlResponse, ProductResponse, RiskUnit,
    SwitchModeRequest, SetLeverageRequest, Ticker, TradeHistoryItem, TradeHistoryRequest,
    TradesResponse, UserTrade, UserTradeRequest,
};

use super::phemex::PhemexClient;

/// Client for the Phemex USD-M perpetual API. For details, see
/// <https://phemex-docs.github.io/#usd-m-perpetual-rest-api>.
///
/// Methods are defined in the same order as the documentation. Each one is
/// thin: build the request, send it, extract the payload, and validate it
/// into the typed model (descaling any legacy `Ep`/`Ev`/`Er` fields).
pub struct UsdmClient<'a> {
    client: &'a PhemexClient,
}

impl<'a> UsdmClient<'a> {
    pub(crate) fn new(client: &'a PhemexClient) -> Self {
        Self { client }
    }

    fn validate<T>(&self, value: &Value) -> Result<T>
    where
        T: DeserializeOwned + AutoScale,
    {
        scale::validate(value.clone(), self.client.catalog())
    }

    /// Validate each element of an optional array payload; an absent or
    /// null payload means an empty result, per the API convention.
    fn validate_rows<T>(&self, rows: Option<&Value>) -> Result<Vec<T>>
    where
        T: DeserializeOwned + AutoScale,
    {
        match rows.and_then(Value::as_array) {
            None => Ok(Vec::new()),
            Some(items) => items.iter().map(|item| self.validate(item)).collect(),
        }
    }

    fn wire<T>(&self, model: &T) -> Result<Map<String, Value>>
    where
        T: serde::Serialize + AutoScale,
    {
        scale::to_wire(model, self.client.catalog())
    }

    /// Fetch product information for all contracts. For details, see
    /// <https://phemex-docs.github.io/#query-product-information-2>.
    ///
    /// NOTE: this is a public endpoint and does not require authentication.
    pub async fn product_information(&self) -> Result<ProductResponse> {
        let resp = self.client.send(&Request::get("/public/products")).await?;
        let data = Extractor::new(&resp).data().require("data")?;
        self.validate(data)
    }

    /// Place a new USD-M perpetual order. For details, see
    /// <https://phemex-docs.github.io/#place-order-http-post-2>.
    pub async fn place_order(&self, request: &OrderRequest) -> Result<Option<OrderResponse>> {
        request.validate()?;
        let body = self.wire(request)?;
        let resp = self
            .client
            .send(&Request::post("/g-orders").body(body))
            .await?;
        self.optional_order(&resp)
    }

    /// Place a new order through the older PUT endpoint. For details, see
    /// <https://phemex-docs.github.io/#place-order-http-put-prefered-2>.
    #[deprecated(note = "place_order is the preferred method")]
    pub async fn place_order_put(&self, request: &OrderRequest) -> Result<Option<OrderResponse>> {
        request.validate()?;
        let params = self.wire(request)?;
        let resp = self
            .client
            .send(&Request::put("/g-orders/create").params(params))
            .await?;
        self.optional_order(&resp)
    }

    /// Amend an existing order by order or client ID. For details, see
    /// <https://phemex-docs.github.io/#amend-order-by-orderid>.
    pub async fn amend_order(&self, request: &AmendOrderRequest) -> Result<Option<OrderResponse>> {
        request.validate()?;
        let params = self.wire(request)?;
        let resp = self
            .client
            .send(&Request::put("/g-orders/replace").params(params))
            .await?;
        self.optional_order(&resp)
    }

    /// Cancel a single order. For details, see
    /// <https://phemex-docs.github.io/#cancel-single-order-by-orderid>.
    pub async fn cancel_order(
        &self,
        request: &CancelOrderRequest,
    ) -> Result<Option<OrderResponse>> {
        request.validate()?;
        let params = self.wire(request)?;
        let resp = self
            .client
            .send(&Request::delete("/g-orders/cancel").params(params))
            .await?;
        self.optional_order(&resp)
    }

    /// Cancel a batch of orders. For details, see
    /// <https://phemex-docs.github.io/#bulk-cancel-orders-2>.
    pub async fn bulk_cancel(
        &self,
        request: &BulkCancelOrderRequest,
    ) -> Result<Vec<OrderResponse>> {
        request.validate()?;
        let params = self.wire(request)?;
        let resp = self
            .client
            .send(&Request::delete("/g-orders").params(params))
            .await?;
        self.validate_rows(Extractor::new(&resp).data().extract())
    }

    /// Cancel all orders for one or more symbols, triggered and untriggered,
    /// by invoking the endpoint twice. For details, see
    /// <https://phemex-docs.github.io/#cancel-all-orders-2>.
    pub async fn cancel_all(&self, request: &CancelAllOrdersRequest) -> Result<()> {
        for untriggered in [true, false] {
            let mut sweep = request.clone();
            sweep.untriggered = Some(untriggered);
            let params = self.wire(&sweep)?;
            self.client
                .send(&Request::delete("/g-orders/all").params(params))
                .await?;
        }
        Ok(())
    }

    /// Query account positions. For details, see
    /// <https://phemex-docs.github.io/#query-account-positions>.
    pub async fn positions(&self, currency: &str) -> Result<PositionResponse> {
        let resp = self
            .client
            .send(&Request::get("/g-accounts/accountPositions").params(currency_params(currency)))
            .await?;
        let data = Extractor::new(&resp).data().require("data")?;
        self.validate(data)
    }

    /// Query account positions with unrealized PnL. For details, see
    /// <https://phemex-docs.github.io/#query-account-positions-with-unrealized-pnl>.
    ///
    /// NOTE: this can be a heavy endpoint if you have many positions.
    pub async fn positions_with_pnl(&self, currency: &str) -> Result<PositionsWithPnlResponse> {
        let resp = self
            .client
            .send(&Request::get("/g-accounts/positions").params(currency_params(currency)))
            .await?;
        let data = Extractor::new(&resp).data().require("data")?;
        self.validate(data)
    }

    /// Fetch the margin/leverage usage view of the account. For details, see
    /// <https://phemex-docs.github.io/#query-risk-unit>.
    pub async fn risk_units(&self) -> Result<Vec<RiskUnit>> {
        let resp = self
            .client
            .send(&Request::get("/g-accounts/risk-unit"))
            .await?;
        self.validate_rows(Extractor::new(&resp).data().extract())
    }

    /// Toggle position mode between OneWay and Hedged. For details, see
    /// <https://phemex-docs.github.io/#switch-position-mode-synchronously>.
    ///
    /// NOTE: this persists the setting until changed again, across sessions.
    pub async fn switch_position_mode(&self, request: &SwitchModeRequest) -> Result<()> {
        let params = self.wire(request)?;
        self.client
            .send(&Request::put("/g-positions/switch-pos-mode-sync").params(params))
            .await?;
        Ok(())
    }

    /// Set leverage for a symbol. For details, see
    /// <https://phemex-docs.github.io/#set-leverage-2>.
    ///
    /// Setting a risk limit manually is no longer supported upstream; adjust
    /// the leverage multiplier instead and the risk limit follows.
    pub async fn set_leverage(&self, request: &SetLeverageRequest) -> Result<()> {
        request.validate()?;
        let params = self.wire(request)?;
        self.client
            .send(&Request::put("/g-positions/leverage").params(params))
            .await?;
        Ok(())
    }

    /// Assign margin balance to an isolated position. For details, see
    /// <https://phemex-docs.github.io/#assign-position-balance>.
    pub async fn assign_position_balance(
        &self,
        request: &AssignPositionBalanceRequest,
    ) -> Result<()> {
        let params = self.wire(request)?;
        self.client
            .send(&Request::post("/g-positions/assign").params(params))
            .await?;
        Ok(())
    }

    /// Fetch all open orders for a symbol. For details, see
    /// <https://phemex-docs.github.io/#query-open-orders-by-symbol-2>.
    pub async fn open_orders(&self, symbol: &str) -> Result<Vec<OpenOrder>> {
        let resp = self
            .client
            .send(&Request::get("/g-orders/activeList").params(symbol_params(symbol)))
            .await?;
        self.validate_rows(Extractor::new(&resp).data().key("rows").extract())
    }

    /// Fetch recently closed orders. For details, see
    /// <https://phemex-docs.github.io/#query-closed-orders-by-symbol-2>.
    pub async fn closed_orders(&self, request: &ClosedOrdersRequest) -> Result<Vec<ClosedOrder>> {
        let params = self.wire(request)?;
        let resp = self
            .client
            .send(&Request::get("/exchange/order/v2/orderList").params(params))
            .await?;
        self.validate_rows(Extractor::new(&resp).data().extract())
    }

    /// Fetch recently closed positions. For details, see
    /// <https://phemex-docs.github.io/#query-closed-positions>.
    pub async fn closed_positions(
        &self,
        request: &ClosedPositionRequest,
    ) -> Result<Vec<ClosedPosition>> {
        let params = self.wire(request)?;
        let resp = self
            .client
            .send(&Request::get("/api-data/g-futures/closedPosition").params(params))
            .await?;
        self.validate_rows(Extractor::new(&resp).data().extract())
    }

    /// Fetch recent trade history. For details, see
    /// <https://phemex-docs.github.io/#query-user-trade-2>.
    pub async fn user_trades(&self, request: &UserTradeRequest) -> Result<Vec<UserTrade>> {
        let params = self.wire(request)?;
        let resp = self
            .client
            .send(&Request::get("/exchange/order/v2/tradingList").params(params))
            .await?;
        self.validate_rows(Extractor::new(&resp).data().extract())
    }

    /// Fetch the order book. For details, see
    /// <https://phemex-docs.github.io/#query-order-book-2>.
    pub async fn order_book(&self, symbol: &str) -> Result<OrderBookResponse> {
        let resp = self
            .client
            .send(&Request::get("/md/v2/orderbook").params(symbol_params(symbol)))
            .await?;
        let result = Extractor::new(&resp).result().require("result")?;
        self.validate(result)
    }

    /// Fetch kline/candlestick data. For details, see
    /// <https://phemex-docs.github.io/#query-kline-2>.
    pub async fn klines(&self, request: &KlineRequest) -> Result<Vec<Kline>> {
        let params = self.wire(request)?;
        let resp = self
            .client
            .send(&Request::get("/exchange/public/md/v2/kline/last").params(params))
            .await?;
        self.validate_rows(Extractor::new(&resp).data().key("rows").extract())
    }

    /// Fetch recent trades. For details, see
    /// <https://phemex-docs.github.io/#query-trade>.
    pub async fn trades(&self, symbol: &str) -> Result<TradesResponse> {
        let resp = self
            .client
            .send(&Request::get("/md/v2/trade").params(symbol_params(symbol)))
            .await?;
        let result = Extractor::new(&resp).result().require("result")?;
        self.validate(result)
    }

    /// Fetch the 24h ticker for a symbol. For details, see
    /// <https://phemex-docs.github.io/#query-24-ticker>.
    ///
    /// NOTE: this uses the newer v3 endpoint; v2 is no longer supported.
    pub async fn ticker(&self, symbol: &str) -> Result<Ticker> {
        let resp = self
            .client
            .send(&Request::get("/md/v3/ticker/24hr").params(symbol_params(symbol)))
            .await?;
        let result = Extractor::new(&resp).result().require("result")?;
        self.validate(result)
    }

    /// Fetch 24h tickers for all symbols. For details, see
    /// <https://phemex-docs.github.io/#query-24-ticker-for-all-symbols>.
    pub async fn tickers(&self) -> Result<Vec<Ticker>> {
        let resp = self
            .client
            .send(&Request::get("/md/v3/ticker/24hr/all"))
            .await?;
        self.validate_rows(Extractor::new(&resp).result().extract())
    }

    /// Fetch order history for a symbol. For details, see
    /// <https://phemex-docs.github.io/#query-orders-history>.
    pub async fn order_history(&self, symbol: &str) -> Result<Vec<OrderHistoryItem>> {
        let resp = self
            .client
            .send(&Request::get("/api-data/g-futures/orders").params(symbol_params(symbol)))
            .await?;
        self.validate_rows(Extractor::new(&resp).data().key("rows").extract())
    }

    /// Fetch one order by symbol and order ID. For details, see
    /// <https://phemex-docs.github.io/#query-orders-by-ids>.
    pub async fn lookup_order(&self, symbol: &str, order_id: &str) -> Result<Option<OpenOrder>> {
        let mut params = symbol_params(symbol);
        params.insert(
            "orderID".to_string(),
            Value::String(order_id.to_string()),
        );
        let resp = self
            .client
            .send(&Request::get("/api-data/g-futures/orders/by-order-id").params(params))
            .await?;
        let orders: Vec<OpenOrder> =
            self.validate_rows(Extractor::new(&resp).data().key("rows").extract())?;
        Ok(orders.into_iter().next_back())
    }

    /// Query user trade history. For details, see
    /// <https://phemex-docs.github.io/#query-trades-history>.
    pub async fn trade_history(
        &self,
        request: &TradeHistoryRequest,
    ) -> Result<Vec<TradeHistoryItem>> {
        request.validate()?;
        let params = self.wire(request)?;
        let resp = self
            .client
            .send(&Request::get("/api-data/g-futures/trades").params(params))
            .await?;
        self.validate_rows(Extractor::new(&resp).data().key("rows").extract())
    }

    /// Fetch funding fee history. For details, see
    /// <https://phemex-docs.github.io/#query-funding-fee-history-2>.
    pub async fn funding_fee_history(
        &self,
        request: &FundingFeeRequest,
    ) -> Result<Vec<FundingFeeItem>> {
        let params = self.wire(request)?;
        let resp = self
            .client
            .send(&Request::get("/api-data/g-futures/funding-fees").params(params))
            .await?;
        self.validate_rows(Extractor::new(&resp).data().key("rows").extract())
    }

    /// Fetch historical funding rates. For details, see
    /// <https://phemex-docs.github.io/#query-real-funding-rates>.
    pub async fn funding_rates(
        &self,
        request: &FundingRateRequest,
    ) -> Result<Vec<FundingRateItem>> {
        let params = self.wire(request)?;
        let resp = self
            .client
            .send(&Request::get("/contract-biz/public/real-funding-rates").params(params))
            .await?;
        self.validate_rows(Extractor::new(&resp).data().key("rows").extract())
    }

    /// Order mutation endpoints return the acknowledged order, or nothing
    /// for fire-and-forget acknowledgements.
    fn optional_order(&self, resp: &Value) -> Result<Option<OrderResponse>> {
        match Extractor::new(resp).data().extract() {
            None => Ok(None),
            Some(data) => self.validate(data).map(Some),
        }
    }
}

fn symbol_params(symbol: &str) -> Map<String, Value> {
    let mut params = Map::new();
    params.insert("symbol".to_string(), Value::String(symbol.to_string()));
    params
}

fn currency_params(currency: &str) -> Map<String, Value> {
    let mut params = Map::new();
    params.insert(
        "currency".to_string(),
        Value::String(currency.to_string()),
    );
    params
}
