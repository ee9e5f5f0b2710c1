//! The fixed list of game servers, split over two factions.

use serde::Serialize;

use crate::types::ServerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    /// Servers `1001..=1021`.
    Elyos,
    /// Servers `2001..=2021`.
    Asmodian,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Server {
    pub id: ServerId,
    pub name: &'static str,
}

impl Server {
    pub fn faction(&self) -> Faction {
        if self.id >= 2000 {
            Faction::Asmodian
        } else {
            Faction::Elyos
        }
    }
}

const fn server(id: ServerId, name: &'static str) -> Server {
    Server { id, name }
}

pub const SERVERS: &[Server] = &[
    server(1001, "시엘"),
    server(1002, "네자칸"),
    server(1003, "바이젤"),
    server(1004, "카이시넬"),
    server(1005, "유스티엘"),
    server(1006, "아리엘"),
    server(1007, "프레기온"),
    server(1008, "메스람타에다"),
    server(1009, "히타니에"),
    server(1010, "나니아"),
    server(1011, "타하바타"),
    server(1012, "루터스"),
    server(1013, "페르노스"),
    server(1014, "다미누"),
    server(1015, "카사카"),
    server(1016, "바카르마"),
    server(1017, "챈가룽"),
    server(1018, "코치룽"),
    server(1019, "이슈타르"),
    server(1020, "티아마트"),
    server(1021, "포에타"),
    server(2001, "이스라펠"),
    server(2002, "지켈"),
    server(2003, "트리니엘"),
    server(2004, "루미엘"),
    server(2005, "마르쿠탄"),
    server(2006, "아스펠"),
    server(2007, "에레슈키갈"),
    server(2008, "브리트라"),
    server(2009, "네몬"),
    server(2010, "하달"),
    server(2011, "루드라"),
    server(2012, "울고른"),
    server(2013, "무닌"),
    server(2014, "오다르"),
    server(2015, "젠카카"),
    server(2016, "크로메데"),
    server(2017, "콰이링"),
    server(2018, "바바룽"),
    server(2019, "파프니르"),
    server(2020, "인드나흐"),
    server(2021, "이스할겐"),
];

/// Look up a server by id.
pub fn find_server(id: ServerId) -> Option<&'static Server> {
    SERVERS.iter().find(|s| s.id == id)
}
