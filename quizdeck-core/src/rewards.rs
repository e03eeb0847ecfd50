//! Points economy and trophy unlocks.
//!
//! Points are earned by finishing a quiz at 80% or better; 5 points buy a
//! single-use secret code bound to a trophy. The ledger is the persisted
//! rewards blob.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::data::{Trophy, TrophyCatalog};
use crate::session::PASS_THRESHOLD;

/// Cost of one secret code, in points.
pub const CODE_COST: u32 = 5;
pub const CODE_LEN: usize = 8;
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Points for a finished quiz. Tighter time limits pay more; a perfect run
/// pays one extra. Unknown limits fall back to the 10-second row.
#[must_use]
pub fn points_for(score_percentage: u32, time_limit: u32) -> u32 {
    if score_percentage < PASS_THRESHOLD {
        return 0;
    }
    let perfect = score_percentage == 100;
    match time_limit {
        5 => {
            if perfect {
                5
            } else {
                4
            }
        }
        15 => {
            if perfect {
                3
            } else {
                2
            }
        }
        20 => {
            if perfect {
                2
            } else {
                1
            }
        }
        _ => {
            if perfect {
                4
            } else {
                3
            }
        }
    }
}

/// A minted single-use unlock code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretCode {
    pub trophy_id: String,
    pub used: bool,
    pub date_created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_used: Option<DateTime<Utc>>,
}

/// One point-earning event in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsEvent {
    pub points: u32,
    pub quiz_name: String,
    pub score_percentage: u32,
    pub time_limit: u32,
    pub date: DateTime<Utc>,
}

/// Summary returned after settling a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizReward {
    pub points_earned: u32,
    pub total_points: u32,
    pub can_buy_code: bool,
}

/// A freshly bought code and what it is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintedCode {
    pub code: String,
    pub trophy_id: String,
    pub remaining_points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MintError {
    #[error("not enough points: need {CODE_COST}, have {have}")]
    InsufficientPoints { have: u32 },
}

/// Why a redemption was rejected. Distinguishable on purpose: the UI tells
/// an already-used code apart from an unknown one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RedeemError {
    #[error("code not found")]
    NotFound,
    #[error("code already used")]
    AlreadyUsed,
    #[error("trophy already unlocked")]
    AlreadyUnlocked,
    #[error("not enough points: need {CODE_COST}, have {have}")]
    InsufficientPoints { have: u32 },
}

/// Persisted rewards state: points, unlocks, codes, history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RewardsLedger {
    #[serde(default)]
    pub total_points: u32,
    #[serde(default)]
    pub unlocked_trophies: Vec<String>,
    #[serde(default)]
    pub secret_codes: BTreeMap<String, SecretCode>,
    #[serde(default)]
    pub points_history: Vec<PointsEvent>,
}

impl RewardsLedger {
    #[must_use]
    pub fn is_unlocked(&self, trophy_id: &str) -> bool {
        self.unlocked_trophies.iter().any(|t| t == trophy_id)
    }

    #[must_use]
    pub fn can_buy_code(&self) -> bool {
        self.total_points >= CODE_COST
    }

    /// Whether a minted code exists and is still redeemable.
    #[must_use]
    pub fn is_code_valid(&self, code: &str) -> bool {
        self.secret_codes.get(code).is_some_and(|c| !c.used)
    }

    /// Credit a finished quiz. History only records runs that earned points.
    pub fn record_quiz(
        &mut self,
        score_percentage: u32,
        quiz_name: &str,
        time_limit: u32,
        now: DateTime<Utc>,
    ) -> QuizReward {
        let points = points_for(score_percentage, time_limit);
        if points > 0 {
            self.total_points += points;
            self.points_history.push(PointsEvent {
                points,
                quiz_name: quiz_name.to_string(),
                score_percentage,
                time_limit,
                date: now,
            });
        }
        QuizReward {
            points_earned: points,
            total_points: self.total_points,
            can_buy_code: self.can_buy_code(),
        }
    }

    /// Spend [`CODE_COST`] points to mint a single-use code bound to a trophy.
    ///
    /// # Errors
    ///
    /// Fails when the ledger holds fewer than [`CODE_COST`] points.
    pub fn mint_code<R: Rng>(
        &mut self,
        trophy_id: &str,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<MintedCode, MintError> {
        if !self.can_buy_code() {
            return Err(MintError::InsufficientPoints {
                have: self.total_points,
            });
        }
        self.total_points -= CODE_COST;

        let mut code = generate_code(rng);
        while self.secret_codes.contains_key(&code) {
            code = generate_code(rng);
        }
        self.secret_codes.insert(
            code.clone(),
            SecretCode {
                trophy_id: trophy_id.to_string(),
                used: false,
                date_created: now,
                date_used: None,
            },
        );
        Ok(MintedCode {
            code,
            trophy_id: trophy_id.to_string(),
            remaining_points: self.total_points,
        })
    }

    /// Redeem a minted code, unlocking its trophy and consuming the code.
    ///
    /// # Errors
    ///
    /// [`RedeemError::NotFound`] for unknown codes, [`RedeemError::AlreadyUsed`]
    /// for spent ones.
    pub fn redeem(&mut self, code: &str, now: DateTime<Utc>) -> Result<String, RedeemError> {
        let entry = self.secret_codes.get_mut(code).ok_or(RedeemError::NotFound)?;
        if entry.used {
            return Err(RedeemError::AlreadyUsed);
        }
        entry.used = true;
        entry.date_used = Some(now);
        let trophy_id = entry.trophy_id.clone();
        if !self.is_unlocked(&trophy_id) {
            self.unlocked_trophies.push(trophy_id.clone());
        }
        Ok(trophy_id)
    }

    /// Redeem a code printed on a locked trophy card. Unlike minted codes
    /// this spends [`CODE_COST`] points at redemption time.
    ///
    /// # Errors
    ///
    /// Fails when the trophy is already unlocked or points are short.
    pub fn redeem_printed(&mut self, trophy: &Trophy) -> Result<(), RedeemError> {
        if self.is_unlocked(&trophy.id) {
            return Err(RedeemError::AlreadyUnlocked);
        }
        if !self.can_buy_code() {
            return Err(RedeemError::InsufficientPoints {
                have: self.total_points,
            });
        }
        self.total_points -= CODE_COST;
        self.unlocked_trophies.push(trophy.id.clone());
        Ok(())
    }

    /// Redeem whatever the player typed: printed catalog codes take
    /// precedence, then minted codes. Input is matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Propagates the specific rejection from whichever path matched, or
    /// [`RedeemError::NotFound`] when nothing did.
    pub fn redeem_input(
        &mut self,
        input: &str,
        catalog: &TrophyCatalog,
        now: DateTime<Utc>,
    ) -> Result<String, RedeemError> {
        let code = input.trim().to_uppercase();
        if code.is_empty() {
            return Err(RedeemError::NotFound);
        }
        if let Some(trophy) = catalog.find_by_printed_code(&code) {
            let id = trophy.id.clone();
            self.redeem_printed(trophy)?;
            return Ok(id);
        }
        self.redeem(&code, now)
    }
}

fn generate_code<R: Rng>(rng: &mut R) -> String {
    (0..CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..CODE_CHARSET.len());
            char::from(CODE_CHARSET[idx])
        })
        .collect()
}
