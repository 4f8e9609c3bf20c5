/*!
ref: https://www.rfc-editor.org/rfc/rfc4035#section-5

Validation utilities: response classification, RRSIG verification, and
NSEC/NSEC3 denial-of-existence proofs. These are the building blocks
the resolver state machine composes into a Secure/Insecure/Bogus verdict.
*/

pub mod classify;
pub mod nsec;
pub mod nsec3;
pub mod rrsig;

pub use classify::{classify, Classification};
pub use rrsig::{verify_rrset, wildcard_expanded};
