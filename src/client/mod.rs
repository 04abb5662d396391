mod phemex;
mod usdm;

pub use phemex::PhemexClient;
pub use usdm::UsdmClient;
