#[cfg(not(feature = "memory"))]
compile_error!("Enable a repo feature: `memory`.");

pub mod catalog;
#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "memory")]
pub mod users;

#[cfg(feature = "memory")]
pub async fn build_repo() -> anyhow::Result<memory::InMemoryOrders> {
    Ok(memory::InMemoryOrders::new())
}
