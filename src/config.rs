use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "gdp_pcap.csv";
pub const DEFAULT_PORT: u16 = 8050;

pub const PAGE_TITLE: &str = "GDP per Capita for Various Countries Over the Years";
pub const PAGE_DESCRIPTION: &str = "The app shows the GDP per capita of various countries \
over time using a graph and an interactive dropdown menu and slider. Each country is \
represented by a different color on the graph and the associated trends in the GDP are \
reflected for each of the years. The dropdown can be used to select a particular country \
while the slider can be used to filter out certain dates.";

/// Start-up settings shared by the HTTP dashboard and the desktop viewer.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Source table, read once at start-up.
    pub data_path: PathBuf,
    /// Local address the HTTP dashboard listens on.
    pub bind_addr: SocketAddr,
    pub title: String,
    pub description: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            bind_addr: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            title: PAGE_TITLE.to_string(),
            description: PAGE_DESCRIPTION.to_string(),
        }
    }
}
