//! The electoral roll.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  citizen::Citizen,
  record::{Mutable, Record},
  reference::Address,
};

/// A citizen's registration to vote at an address. Voters live in their own
/// 64-bit key space; each citizen has at most one voter row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
  pub id:                i64,
  pub citizen_id:        i32,
  pub address_id:        i32,
  pub open_register:     bool,
  pub registration_date: NaiveDate,
}

impl Voter {
  pub fn is_on_open_register(&self) -> bool { self.open_register }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVoter {
  pub citizen_id:        i32,
  pub address_id:        i32,
  #[serde(default)]
  pub open_register:     bool,
  pub registration_date: NaiveDate,
}

/// Full-update payload for a [`Voter`]. The citizen binding is fixed at
/// registration and is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterUpdate {
  pub address_id:        i32,
  #[serde(default)]
  pub open_register:     bool,
  pub registration_date: NaiveDate,
}

impl VoterUpdate {
  /// The update that leaves `voter` unchanged.
  pub fn from_voter(voter: &Voter) -> Self {
    Self {
      address_id:        voter.address_id,
      open_register:     voter.open_register,
      registration_date: voter.registration_date,
    }
  }
}

impl Record for Voter {
  type Id = i64;
  type New = NewVoter;

  const ENTITY: &'static str = "voter";

  fn id(&self) -> i64 { self.id }
}

impl Mutable for Voter {
  type Patch = VoterUpdate;
}

/// A voter with its citizen and address fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoterView {
  pub voter:   Voter,
  pub citizen: Option<Citizen>,
  pub address: Option<Address>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterStatistics {
  pub total:                u64,
  pub on_open_register:     u64,
  pub not_on_open_register: u64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn open_register_defaults_to_false() {
    let v: NewVoter = serde_json::from_value(serde_json::json!({
      "citizen_id": 1,
      "address_id": 2,
      "registration_date": "2019-05-01",
    }))
    .unwrap();
    assert!(!v.open_register);
  }

  #[test]
  fn identity_update_preserves_fields() {
    let voter = Voter {
      id:                9,
      citizen_id:        1,
      address_id:        2,
      open_register:     true,
      registration_date: NaiveDate::from_ymd_opt(2019, 5, 1).unwrap(),
    };
    let patch = VoterUpdate::from_voter(&voter);
    assert_eq!(patch.address_id, 2);
    assert!(patch.open_register);
    assert!(voter.is_on_open_register());
  }
}
