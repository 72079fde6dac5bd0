//! Application state container and view model computation.
//!
//! [`AppState`] aggregates one controller per page component. The controllers
//! share no state with each other; the page shell only composes them. View
//! models are computed on demand from a state snapshot.

use super::nav::{NavState, Overlay};
use super::newsletter::Newsletter;
use super::post::{PostDetail, PostLoad};
use super::search::{SearchController, SearchPhase};
use crate::domain::{Category, Comment, Post, Route, SearchResult};
use crate::ui::highlight::highlight;
use crate::ui::share::ShareLinks;
use crate::ui::viewmodel::{
    CommentItem, NavView, PageViewModel, PostBody, PostPageView, RelatedItem, ResultItem,
    SearchPanelView,
};
use crate::Config;

#[derive(Debug, Clone)]
pub struct AppState {
    pub search: SearchController,
    pub nav: NavState,
    pub post: PostDetail,
    pub newsletter: Newsletter,
    /// Public origin of the site, used to build share links.
    pub site_url: String,
}

impl AppState {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            search: SearchController::new(config.debounce, config.search_limit),
            nav: NavState::default(),
            post: PostDetail::new(config.related_limit),
            newsletter: Newsletter::default(),
            site_url: config.public_origin().to_string(),
        }
    }

    /// Computes the renderable page from current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> PageViewModel {
        PageViewModel {
            nav: self.compute_nav(),
            search: self.compute_search_panel(),
            post: self.compute_post_page(),
            newsletter_status: self.newsletter.status().message().map(str::to_string),
        }
    }

    fn compute_nav(&self) -> NavView {
        NavView {
            menu_open: self.nav.overlay == Overlay::Menu,
            mobile_search_open: self.nav.overlay == Overlay::Search,
            lifestyle_open: self.nav.lifestyle_open,
            lifestyle_links: Category::ALL
                .into_iter()
                .filter(|c| c.is_lifestyle())
                .map(|c| (c.label().to_string(), c.route_path()))
                .collect(),
        }
    }

    fn compute_search_panel(&self) -> SearchPanelView {
        let query = self.search.trimmed_query();
        match self.search.phase() {
            SearchPhase::Idle | SearchPhase::Dismissed => SearchPanelView::Hidden,
            SearchPhase::Pending | SearchPhase::Searching => SearchPanelView::Loading,
            SearchPhase::Results | SearchPhase::Errored if self.search.results().is_empty() => {
                SearchPanelView::NoResults {
                    message: format!("No results found for \"{query}\""),
                }
            }
            SearchPhase::Results | SearchPhase::Errored => SearchPanelView::Results {
                items: self
                    .search
                    .results()
                    .iter()
                    .map(|result| Self::compute_result_item(result, query))
                    .collect(),
                view_all: Route::Search(query.to_string()),
            },
        }
    }

    fn compute_result_item(result: &SearchResult, query: &str) -> ResultItem {
        ResultItem {
            id: result.id.clone(),
            title: highlight(&result.title, query),
            category: result.category.to_string(),
            date: result.created_at.format("%b %-d").to_string(),
            image_url: result.image_url.clone(),
        }
    }

    fn compute_post_page(&self) -> Option<PostPageView> {
        let view = match self.post.load() {
            PostLoad::Idle => return None,
            PostLoad::Loading => PostPageView::Loading,
            PostLoad::NotFound => PostPageView::NotFound,
            PostLoad::Failed(e) => PostPageView::Unavailable {
                message: e.to_string(),
            },
            PostLoad::Loaded(post) => PostPageView::Loaded(Box::new(self.compute_post_body(post))),
        };
        Some(view)
    }

    fn compute_post_body(&self, post: &Post) -> PostBody {
        let comments: Vec<CommentItem> = self.post.comments().iter().map(compute_comment).collect();
        let page_url = format!("{}{}", self.site_url, Route::Post(post.id.clone()).path());

        PostBody {
            id: post.id.clone(),
            title: post.title.clone(),
            category: post.category.label().to_string(),
            author: post.author.clone(),
            date: post.created_at.format("%B %-d, %Y").to_string(),
            views: post.views,
            comment_count: comments.len(),
            content: post.content.clone(),
            image_url: post.image_url.clone(),
            related: self
                .post
                .related()
                .iter()
                .map(|r| RelatedItem {
                    id: r.id.clone(),
                    title: r.title.clone(),
                    route: Route::Post(r.id.clone()),
                })
                .collect(),
            comments,
            submit_enabled: !self.post.is_submitting(),
            share: ShareLinks::new(&page_url, Some(&post.title)),
        }
    }
}

fn compute_comment(comment: &Comment) -> CommentItem {
    CommentItem {
        name: comment.name.clone(),
        date: comment.created_at.format("%B %-d, %Y").to_string(),
        body: comment.body.clone(),
    }
}
