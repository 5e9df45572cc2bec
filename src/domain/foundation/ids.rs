//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an id from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id! {
    /// Tenant identity. Every clinic-scoped record belongs to exactly one owner.
    OwnerId
}

uuid_id! {
    /// Unique identifier for a subscription.
    SubscriptionId
}

uuid_id! {
    /// Unique identifier for a payment transaction.
    PaymentId
}

uuid_id! {
    /// Unique identifier for a patient.
    PatientId
}

uuid_id! {
    /// Unique identifier for a dentist.
    DentistId
}

uuid_id! {
    /// Unique identifier for a procedure in the catalog.
    ProcedureId
}

uuid_id! {
    /// Unique identifier for an appointment.
    AppointmentId
}

uuid_id! {
    /// Unique identifier for a cash-flow ledger entry (income or expense).
    EntryId
}
