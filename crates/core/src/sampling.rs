//! Random sampling policy for the opportunistic collector.
//!
//! The upstream API has no "list" or random endpoint, only substring search,
//! so discovery works by searching random `(server, keyword, page)` triples.
//! Keywords are substrings that character names cluster around: class terms,
//! common nouns and single-syllable surnames.
//!
//! All selection functions take the random source explicitly so tests can use
//! a seeded generator.

use rand::Rng;
use serde::Serialize;

use crate::servers::{Server, SERVERS};

/// Highest result page the collector will request.
pub const MAX_SEARCH_PAGE: u32 = 5;

/// Results requested per collector search.
pub const COLLECTOR_PAGE_SIZE: u32 = 50;

pub const KEYWORDS: &[&str] = &[
    // classes
    "검성", "수호", "살성", "궁성", "마도", "정령", "치유", "호법",
    "기사", "전사", "도적", "법사", "사제", "힐러", "탱커", "딜러",
    // game terms
    "지존", "초보", "고수", "신", "악마", "천사", "영웅", "전설", "신화",
    "군주", "대장", "왕", "황제", "장군", "대박", "축복", "저주",
    // nature
    "하늘", "바다", "구름", "바람", "태양", "달", "별", "우주", "지구", "자연",
    "노을", "새벽", "아침", "점심", "저녁", "밤", "봄", "여름", "가을", "겨울",
    // animals
    "사자", "호랑", "늑대", "여우", "곰", "용", "드래곤", "피닉스", "독수리",
    // colours
    "블랙", "화이트", "레드", "블루", "골드", "실버", "그린", "핑크",
    // moods
    "사랑", "행복", "희망", "기쁨", "슬픔", "분노", "자유", "평화", "승리",
    // surnames
    "김", "이", "박", "최", "정", "강", "조", "윤", "장", "임",
    "한", "오", "서", "권", "황", "안", "송", "류", "홍",
];

/// One collector query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionPlan {
    pub server: Server,
    pub keyword: &'static str,
    pub page: u32,
    pub size: u32,
}

/// Pick a server uniformly at random.
pub fn pick_server<R: Rng + ?Sized>(rng: &mut R) -> Server {
    SERVERS[rng.random_range(0..SERVERS.len())]
}

/// Pick a keyword uniformly at random.
pub fn pick_keyword<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    KEYWORDS[rng.random_range(0..KEYWORDS.len())]
}

/// Pick a page uniformly in `1..=MAX_SEARCH_PAGE`.
pub fn pick_page<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(1..=MAX_SEARCH_PAGE)
}

/// Draw a complete collector query.
pub fn plan_collection<R: Rng + ?Sized>(rng: &mut R) -> CollectionPlan {
    let server = pick_server(rng);
    let keyword = pick_keyword(rng);
    let page = pick_page(rng);
    CollectionPlan {
        server,
        keyword,
        page,
        size: COLLECTOR_PAGE_SIZE,
    }
}
