use std::sync::Arc;

use futures::{
    StreamExt, TryStreamExt,
    stream::{self, BoxStream},
};

use crate::domain::{
    PlayerLevelId, RepoError,
    report::{PLAYER_LEVEL_REPORT_HEADER, PlayerLevelReportRepository, PlayerLevelReportRow},
};

pub const DEFAULT_EXPORT_PAGE_SIZE: usize = 2000;

pub trait ExportPlayerLevelsUseCase {
    /// Lazily produces the CSV report, one newline-terminated line per item.
    /// Nothing is fetched until the stream is polled, and at most one page
    /// of rows is held at a time.
    fn export(&self) -> BoxStream<'static, Result<String, RepoError>>;
}

pub struct ExportPlayerLevelsUseCaseImpl<R: PlayerLevelReportRepository> {
    report_repository: Arc<R>,
    page_size: usize,
}

impl<R: PlayerLevelReportRepository> ExportPlayerLevelsUseCaseImpl<R> {
    pub fn new(report_repository: Arc<R>, page_size: usize) -> Self {
        Self {
            report_repository,
            page_size: page_size.max(1),
        }
    }
}

struct PageCursor<R> {
    repository: Arc<R>,
    after: Option<PlayerLevelId>,
    page_size: usize,
    exhausted: bool,
}

async fn next_page<R: PlayerLevelReportRepository + Send + Sync + 'static>(
    mut cursor: PageCursor<R>,
) -> Result<Option<(Vec<PlayerLevelReportRow>, PageCursor<R>)>, RepoError> {
    if cursor.exhausted {
        return Ok(None);
    }
    let page = cursor
        .repository
        .fetch_player_level_page(cursor.after, cursor.page_size)
        .await
        .inspect_err(|e| log::error!("Player level export aborted: {}", e))?;

    let Some(last) = page.last() else {
        return Ok(None);
    };
    cursor.after = Some(last.player_level_id);
    cursor.exhausted = page.len() < cursor.page_size;
    log::debug!(
        "Exporting page of {} player levels up to id {}",
        page.len(),
        last.player_level_id
    );
    Ok(Some((page, cursor)))
}

impl<R: PlayerLevelReportRepository + Send + Sync + 'static> ExportPlayerLevelsUseCase
    for ExportPlayerLevelsUseCaseImpl<R>
{
    fn export(&self) -> BoxStream<'static, Result<String, RepoError>> {
        let cursor = PageCursor {
            repository: self.report_repository.clone(),
            after: None,
            page_size: self.page_size,
            exhausted: false,
        };

        let header = stream::once(async {
            Ok::<_, RepoError>(format!("{}\n", PLAYER_LEVEL_REPORT_HEADER))
        });
        let rows = stream::try_unfold(cursor, next_page)
            .map_ok(|page| {
                stream::iter(
                    page.into_iter()
                        .map(|row| Ok::<_, RepoError>(row.to_csv_line())),
                )
            })
            .try_flatten();

        header.chain(rows).boxed()
    }
}
