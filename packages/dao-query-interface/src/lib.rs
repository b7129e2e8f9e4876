#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

pub mod error;
pub mod msg;
pub mod order;
pub mod pagination;
pub mod validate;


pub use crate::error::QueryError;
pub use crate::msg::{
    EmptyQuery, Extension, ProposalQuery, ProposalsQuery, QueryMsg, TokenBalancesQuery, VoteQuery,
    VotesQuery,
};
pub use crate::order::RangeOrder;
pub use crate::pagination::{Page, PageLimits, Paginated};
pub use crate::validate::{parse_query, parse_query_value};
