use crate::core::{Unit, UnitCall};
use futures::stream::{self, StreamExt};
use std::time::Duration;

/// 對所有單元執行同一種呼叫，最多同時 `concurrency` 個
///
/// 每個呼叫各自帶有 timeout，結果依輸入順序回傳，數量與輸入一一對應。
/// `concurrency` 為 1 時即為逐一執行。
pub async fn fan_out<C>(call: &C, units: &[Unit], timeout: Duration, concurrency: usize) -> Vec<C::Outcome>
where
    C: UnitCall + ?Sized,
{
    let limit = concurrency.max(1);
    tracing::debug!("Fanning out to {} units (concurrency {})", units.len(), limit);

    stream::iter(units)
        .map(|unit| call.call(unit, timeout))
        .buffered(limit)
        .collect()
        .await
}

/// 組出單元端點的 URL，例如 `http://localhost:18000/health`
pub(crate) fn endpoint_url(host: &str, port: u16, path: &str) -> String {
    format!("http://{}:{}/{}", host, port, path.trim_start_matches('/'))
}
