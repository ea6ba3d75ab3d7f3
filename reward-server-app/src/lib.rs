use std::sync::Arc;

use crate::{
    domain::{
        boost::BoostRepository, level::LevelRepository, player::PlayerRepository,
        report::PlayerLevelReportRepository,
    },
    ports::clock::Clock,
    workflow::{
        catalog::{
            attach_prize::{AttachPrizeUseCase, AttachPrizeUseCaseImpl},
            create_boost::{CreateBoostUseCase, CreateBoostUseCaseImpl},
            create_level::{CreateLevelUseCase, CreateLevelUseCaseImpl},
            create_prize::{CreatePrizeUseCase, CreatePrizeUseCaseImpl},
        },
        export::player_levels::{ExportPlayerLevelsUseCase, ExportPlayerLevelsUseCaseImpl},
        player::{
            add_boost::{AddBoostUseCase, AddBoostUseCaseImpl},
            get::{GetPlayerUseCase, GetPlayerUseCaseImpl},
            list_boosts::{ListPlayerBoostsUseCase, ListPlayerBoostsUseCaseImpl},
            record_login::{RecordLoginUseCase, RecordLoginUseCaseImpl},
            register::{RegisterPlayerUseCase, RegisterPlayerUseCaseImpl},
        },
        progress::{
            assign_prize::{AssignPrizeUseCase, AssignPrizeUseCaseImpl},
            record_result::{RecordLevelResultUseCase, RecordLevelResultUseCaseImpl},
        },
    },
};

pub mod domain;
pub mod ports;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use workflow::export::player_levels::DEFAULT_EXPORT_PAGE_SIZE;

#[derive(Clone, Debug)]
pub struct ApplicationSettings {
    pub export_page_size: usize,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            export_page_size: DEFAULT_EXPORT_PAGE_SIZE,
        }
    }
}

pub struct Application {
    pub player_register_use_case: Box<dyn RegisterPlayerUseCase + Send + Sync + 'static>,
    pub player_get_use_case: Box<dyn GetPlayerUseCase + Send + Sync + 'static>,
    pub player_record_login_use_case: Box<dyn RecordLoginUseCase + Send + Sync + 'static>,
    pub player_add_boost_use_case: Box<dyn AddBoostUseCase + Send + Sync + 'static>,
    pub player_list_boosts_use_case: Box<dyn ListPlayerBoostsUseCase + Send + Sync + 'static>,

    pub catalog_create_boost_use_case: Box<dyn CreateBoostUseCase + Send + Sync + 'static>,
    pub catalog_create_level_use_case: Box<dyn CreateLevelUseCase + Send + Sync + 'static>,
    pub catalog_create_prize_use_case: Box<dyn CreatePrizeUseCase + Send + Sync + 'static>,
    pub catalog_attach_prize_use_case: Box<dyn AttachPrizeUseCase + Send + Sync + 'static>,

    pub progress_record_result_use_case: Box<dyn RecordLevelResultUseCase + Send + Sync + 'static>,
    pub progress_assign_prize_use_case: Box<dyn AssignPrizeUseCase + Send + Sync + 'static>,

    pub player_levels_export_use_case: Box<dyn ExportPlayerLevelsUseCase + Send + Sync + 'static>,
}

pub fn build_application<
    P: PlayerRepository + Send + Sync + 'static,
    B: BoostRepository + Send + Sync + 'static,
    L: LevelRepository + Send + Sync + 'static,
    R: PlayerLevelReportRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
>(
    player_repository: Arc<P>,
    boost_repository: Arc<B>,
    level_repository: Arc<L>,
    report_repository: Arc<R>,
    clock: Arc<C>,
    settings: ApplicationSettings,
) -> Application {
    Application {
        player_register_use_case: Box::new(RegisterPlayerUseCaseImpl::new(
            player_repository.clone(),
            clock.clone(),
        )),
        player_get_use_case: Box::new(GetPlayerUseCaseImpl::new(player_repository.clone())),
        player_record_login_use_case: Box::new(RecordLoginUseCaseImpl::new(
            player_repository.clone(),
            clock.clone(),
        )),
        player_add_boost_use_case: Box::new(AddBoostUseCaseImpl::new(
            player_repository.clone(),
            boost_repository.clone(),
            clock.clone(),
        )),
        player_list_boosts_use_case: Box::new(ListPlayerBoostsUseCaseImpl::new(
            player_repository.clone(),
            boost_repository.clone(),
        )),

        catalog_create_boost_use_case: Box::new(CreateBoostUseCaseImpl::new(
            boost_repository.clone(),
        )),
        catalog_create_level_use_case: Box::new(CreateLevelUseCaseImpl::new(
            level_repository.clone(),
        )),
        catalog_create_prize_use_case: Box::new(CreatePrizeUseCaseImpl::new(
            level_repository.clone(),
        )),
        catalog_attach_prize_use_case: Box::new(AttachPrizeUseCaseImpl::new(
            level_repository.clone(),
        )),

        progress_record_result_use_case: Box::new(RecordLevelResultUseCaseImpl::new(
            level_repository.clone(),
        )),
        progress_assign_prize_use_case: Box::new(AssignPrizeUseCaseImpl::new(
            level_repository.clone(),
            clock.clone(),
        )),

        player_levels_export_use_case: Box::new(ExportPlayerLevelsUseCaseImpl::new(
            report_repository,
            settings.export_page_size,
        )),
    }
}
