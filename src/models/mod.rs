pub mod certificate;
pub mod flex;
pub mod order;
pub mod page;
pub mod response;

pub use certificate::{CertificateDetail, CertificateSummary, HypercertId, WorkScope};
pub use order::{CheapestOrder, Order, OrderBook};
pub use page::{CertificatePage, Pagination};
pub use response::ResponseEnvelope;
