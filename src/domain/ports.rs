use crate::domain::model::{Registry, Unit};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 檢查本機埠號目前是否可綁定
pub trait PortProbe: Send + Sync {
    fn is_free(&self, port: u16) -> bool;
}

/// 埠號登記表的持久化介面
pub trait RegistryStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Option<Registry>>> + Send;
    fn save(&self, registry: &Registry) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 對單一單元發出的一次呼叫；失敗必須以結果值表達，不能向外傳遞
#[async_trait]
pub trait UnitCall: Send + Sync {
    type Outcome: Send;

    async fn call(&self, unit: &Unit, timeout: Duration) -> Self::Outcome;
}
