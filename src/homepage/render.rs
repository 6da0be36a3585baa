use crate::models::{category, ArticleSummary};
use crate::util::strip_tags;
use serde::Serialize;
use tera::{Context, Tera};

pub const HOMEPAGE_TEMPLATE: &str = "index.html";
pub const EXCERPT_LENGTH: usize = 150;
pub const UNKNOWN_AUTHOR: &str = "Unknown";

pub fn site_templates() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_template(
        HOMEPAGE_TEMPLATE,
        include_str!("../../templates/index.html"),
    )?;
    Ok(tera)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryLink<'a> {
    pub name: &'a str,
    pub slug: &'a str,
}

/// One article as shown on the homepage. Values are raw and escaped by the template,
/// except `image`, which is already attribute-escaped so URLs keep their slashes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArticleCard<'a> {
    pub title: &'a str,
    pub image: Option<String>,
    pub author: &'a str,
    pub published: Option<String>,
    pub category: Option<&'a str>,
    pub excerpt: String,
    pub href: String,
}

impl<'a> From<&'a ArticleSummary> for ArticleCard<'a> {
    fn from(article: &'a ArticleSummary) -> Self {
        ArticleCard {
            title: &article.title,
            image: non_empty(article.featured_image.as_deref()).map(url_attribute),
            author: article.author_name.as_deref().unwrap_or(UNKNOWN_AUTHOR),
            published: article
                .published_at
                .map(|at| at.format("%b %d, %Y").to_string()),
            category: non_empty(article.category_name.as_deref()),
            excerpt: excerpt(article),
            href: article_href(&article.slug),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HomepageView<'a> {
    pub site_name: &'a str,
    /// Attribute-escaped, without a trailing slash.
    pub site_url: String,
    pub year: i32,
    pub categories: Vec<CategoryLink<'a>>,
    pub articles: Vec<ArticleCard<'a>>,
}

impl<'a> HomepageView<'a> {
    pub fn new(
        site_name: &'a str,
        site_url: &'a str,
        year: i32,
        articles: &'a [ArticleSummary],
        categories: &'a [category::Model],
    ) -> HomepageView<'a> {
        HomepageView {
            site_name,
            site_url: url_attribute(site_url.trim_end_matches('/')),
            year,
            categories: categories
                .iter()
                .map(|category| CategoryLink {
                    name: &category.name,
                    slug: &category.slug,
                })
                .collect(),
            articles: articles.iter().map(ArticleCard::from).collect(),
        }
    }
}

pub fn render_homepage(tera: &Tera, view: &HomepageView) -> tera::Result<String> {
    let context = Context::from_serialize(view)?;
    tera.render(HOMEPAGE_TEMPLATE, &context)
}

/// The stored excerpt, or the opening of the content with its markup removed.
pub fn excerpt(article: &ArticleSummary) -> String {
    match non_empty(article.excerpt.as_deref()) {
        Some(excerpt) => excerpt.to_string(),
        None => {
            let mut opening = strip_tags(&article.content)
                .chars()
                .take(EXCERPT_LENGTH)
                .collect::<String>();
            opening.push_str("...");
            opening
        }
    }
}

pub fn article_href(slug: &str) -> String {
    format!("article.php?slug={}", url_escape::encode_component(slug))
}

/// Escapes a URL for a double quoted attribute. Unlike the template's autoescape this
/// leaves `/` alone.
pub fn url_attribute(url: &str) -> String {
    html_escape::encode_double_quoted_attribute(url).into_owned()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
