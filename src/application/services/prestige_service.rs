//! Prestige Service - Purchase and reset transactions over the ledger
//!
//! The only code paths that change prestige state. A purchase charges points
//! and records the profession under the skill's record lock as one step. A
//! reset trades experience for freshly minted points and strips the recipes
//! the skill granted; it is best-effort and reports partial failures instead
//! of rolling back.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::application::ports::outbound::{
    EffectApplierPort, ExperienceStorePort, LedgerRepositoryError, LedgerRepositoryPort,
    RecipeRemoverPort, SkillCatalogPort,
};
use crate::application::services::SettingsService;
use crate::domain::aggregates::PrestigeLedger;
use crate::domain::entities::{PrestigeRecord, SpendRejection};
use crate::domain::services::{LookupFailure, ProfessionIndex};
use crate::domain::value_objects::{ProfessionId, ProfessionTier, SkillId};

/// The host collaborators the prestige service drives
#[derive(Clone)]
pub struct HostAdapters {
    pub catalog: Arc<dyn SkillCatalogPort>,
    pub experience: Arc<dyn ExperienceStorePort>,
    pub recipes: Arc<dyn RecipeRemoverPort>,
    pub effects: Arc<dyn EffectApplierPort>,
}

/// A committed profession purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseReceipt {
    pub profession: ProfessionId,
    pub skill: SkillId,
    pub tier: ProfessionTier,
    pub cost: u32,
    pub remaining_points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PurchaseError {
    #[error("Not enough prestige points in {skill}: {cost} needed, {available} available")]
    InsufficientPoints {
        skill: SkillId,
        cost: u32,
        available: u32,
    },
    #[error("Profession {profession} is already permanent for {skill}")]
    AlreadyPurchased {
        skill: SkillId,
        profession: ProfessionId,
    },
    #[error(transparent)]
    ProfessionLookup(#[from] LookupFailure),
    #[error("Profession {profession} of {skill} has unknown tier {tier}")]
    UnknownProfessionTier {
        skill: SkillId,
        profession: ProfessionId,
        tier: u8,
    },
}

impl PurchaseError {
    /// Whether the player caused the failure, as opposed to a broken catalog
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PurchaseError::InsufficientPoints { .. } | PurchaseError::AlreadyPurchased { .. }
        )
    }
}

/// Step of a reset at which a collaborator failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetStage {
    ResolveSkill,
    ReadExperience,
    WriteExperience,
    RemoveCraftingRecipes,
    RemoveCookingRecipes,
}

/// What a reset changed, as far as it got
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetReport {
    pub skill: SkillId,
    pub experience_before: Option<i64>,
    pub experience_after: Option<i64>,
    pub points_minted: u32,
    /// Balance after the reset, `None` if no points were minted
    pub points: Option<u32>,
    pub crafting_recipes_removed: usize,
    pub cooking_recipes_removed: usize,
}

impl ResetReport {
    fn new(skill: SkillId) -> Self {
        Self {
            skill,
            experience_before: None,
            experience_after: None,
            points_minted: 0,
            points: None,
            crafting_recipes_removed: 0,
            cooking_recipes_removed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResetOutcome {
    Completed(ResetReport),
    /// Steps before `stage` took effect and were not rolled back
    PartialFailure {
        stage: ResetStage,
        detail: String,
        report: ResetReport,
    },
}

impl ResetOutcome {
    #[cfg(test)]
    pub fn report(&self) -> &ResetReport {
        match self {
            ResetOutcome::Completed(report) => report,
            ResetOutcome::PartialFailure { report, .. } => report,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ResetOutcome::Completed(_))
    }
}

pub struct PrestigeService {
    ledger: Arc<PrestigeLedger>,
    index: ProfessionIndex,
    host: HostAdapters,
    settings: Arc<SettingsService>,
    repository: Arc<dyn LedgerRepositoryPort>,
}

impl PrestigeService {
    /// Index the host catalog and make sure every skill has a record
    pub async fn load(
        ledger: Arc<PrestigeLedger>,
        host: HostAdapters,
        settings: Arc<SettingsService>,
        repository: Arc<dyn LedgerRepositoryPort>,
    ) -> Result<Self> {
        let catalog = host
            .catalog
            .all_skills()
            .await
            .context("Failed to read skill catalog from host")?;

        let index = ProfessionIndex::build(&catalog);
        for profession in index.ambiguous_professions() {
            warn!(profession = %profession, "Profession is offered by more than one skill and cannot be purchased");
        }

        let created = ledger.ensure_skills(index.skills()).await;
        info!(skills = catalog.len(), created, "Prestige catalog indexed");

        Ok(Self {
            ledger,
            index,
            host,
            settings,
            repository,
        })
    }

    /// Whether the host catalog defines `skill`
    pub fn knows_skill(&self, skill: &SkillId) -> bool {
        self.index.contains_skill(skill)
    }

    pub async fn get_record(&self, skill: &SkillId) -> PrestigeRecord {
        self.ledger.get_record(skill).await
    }

    pub async fn all_records(&self) -> Vec<PrestigeRecord> {
        self.ledger.all_records().await
    }

    /// Spend prestige points to make a profession permanent
    #[instrument(skip(self))]
    pub async fn purchase_profession(
        &self,
        profession: ProfessionId,
    ) -> Result<PurchaseReceipt, PurchaseError> {
        let owner = self.index.resolve(profession).map_err(|failure| {
            error!(error = %failure, "Cannot resolve the skill owning profession");
            PurchaseError::from(failure)
        })?;
        let skill = owner.skill.clone();

        let tier = ProfessionTier::try_from(owner.tier).map_err(|tier| {
            error!(skill = %skill, tier, "Profession has a tier with no configured cost");
            PurchaseError::UnknownProfessionTier {
                skill: skill.clone(),
                profession,
                tier,
            }
        })?;
        let cost = self.settings.get().await.cost_for(tier);

        let slot = self.ledger.slot(&skill).await;
        let remaining_points = {
            let mut record = slot.lock().await;
            record.spend(profession, cost).map_err(|rejection| match rejection {
                SpendRejection::AlreadyPurchased => {
                    info!(skill = %skill, "Profession already permanent, nothing charged");
                    PurchaseError::AlreadyPurchased {
                        skill: skill.clone(),
                        profession,
                    }
                }
                SpendRejection::InsufficientPoints { available } => {
                    info!(skill = %skill, cost, available, "Not enough prestige points for profession");
                    PurchaseError::InsufficientPoints {
                        skill: skill.clone(),
                        cost,
                        available,
                    }
                }
            })?
        };

        info!(skill = %skill, %tier, cost, remaining_points, "Profession permanently added");

        if let Err(e) = self.host.effects.ensure_profession_effects_applied().await {
            warn!(error = %e, "Failed to apply purchased profession effects");
        }

        Ok(PurchaseReceipt {
            profession,
            skill,
            tier,
            cost,
            remaining_points,
        })
    }

    /// Trade a skill's experience for prestige points
    ///
    /// Never fails outright: a collaborator error stops the reset where it
    /// happened and comes back as [`ResetOutcome::PartialFailure`].
    #[instrument(skip(self, skill), fields(skill = %skill))]
    pub async fn reset_skill(&self, skill: &SkillId) -> ResetOutcome {
        let mut report = ResetReport::new(skill.clone());

        if !self.index.contains_skill(skill) {
            return partial_failure(
                ResetStage::ResolveSkill,
                format!("Skill not in catalog: {}", skill),
                report,
            );
        }

        let costs = self.settings.get().await;
        let slot = self.ledger.slot(skill).await;
        let mut record = slot.lock().await;
        info!("Prestiging skill");

        let experience = match self.host.experience.get_experience(skill).await {
            Ok(experience) => experience,
            Err(e) => return partial_failure(ResetStage::ReadExperience, e.to_string(), report),
        };
        report.experience_before = Some(experience);

        // Never below zero, and never above what the skill already had
        let remaining = experience
            .saturating_sub(i64::from(costs.experience_cost_per_reset))
            .max(experience.min(0));
        if let Err(e) = self.host.experience.set_experience(skill, remaining).await {
            return partial_failure(ResetStage::WriteExperience, e.to_string(), report);
        }
        report.experience_after = Some(remaining);
        info!(removed = experience - remaining, remaining, "Removed experience");

        let points = record.mint(costs.points_per_reset);
        report.points_minted = costs.points_per_reset;
        report.points = Some(points);
        info!(minted = costs.points_per_reset, points, "Prestige points added");

        match self.host.recipes.remove_crafting_recipes(skill).await {
            Ok(removed) => {
                debug!(count = removed.len(), "Crafting recipes removed");
                report.crafting_recipes_removed = removed.len();
                record.save_crafting_recipes(removed);
            }
            Err(e) => {
                return partial_failure(ResetStage::RemoveCraftingRecipes, e.to_string(), report)
            }
        }

        match self.host.recipes.remove_cooking_recipes(skill).await {
            Ok(removed) => {
                debug!(count = removed.len(), "Cooking recipes removed");
                report.cooking_recipes_removed = removed.len();
                record.save_cooking_recipes(removed);
            }
            Err(e) => {
                return partial_failure(ResetStage::RemoveCookingRecipes, e.to_string(), report)
            }
        }

        ResetOutcome::Completed(report)
    }

    /// Write every record through the ledger repository
    #[instrument(skip(self))]
    pub async fn persist(&self) -> Result<usize, LedgerRepositoryError> {
        let records = self.ledger.all_records().await;
        for record in &records {
            self.repository.save(record).await?;
        }
        debug!(count = records.len(), "Prestige ledger saved");
        Ok(records.len())
    }
}

fn partial_failure(stage: ResetStage, detail: String, report: ResetReport) -> ResetOutcome {
    error!(?stage, detail = %detail, "Skill reset stopped early, completed steps were kept");
    ResetOutcome::PartialFailure {
        stage,
        detail,
        report,
    }
}
