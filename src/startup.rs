//! 启动期检查与地址提示

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use crate::config::AppConfig;

/// 检查静态页面是否就位（缺失只告警，不阻止启动）
pub fn run_startup_checks(config: &AppConfig) {
    let dir = config.public_dir();
    if !dir.is_dir() {
        tracing::warn!("静态资源目录不存在: {:?}（/ 与 /admin 将返回 404）", dir);
        return;
    }
    for page in ["index.html", "admin.html"] {
        let path = dir.join(page);
        if !path.is_file() {
            tracing::warn!("缺少页面文件: {:?}", path);
        }
    }
}

/// 本机对外的 IPv4 地址
///
/// 通过“连接”一个外部地址读取路由选择的本地地址；UDP connect 不会发送数据包。
pub fn primary_ipv4() -> Option<Ipv4Addr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).ok()?;
    socket.connect((Ipv4Addr::new(192, 0, 2, 1), 80)).ok()?;
    match socket.local_addr().ok()?.ip() {
        IpAddr::V4(ip) if !ip.is_loopback() && !ip.is_unspecified() => Some(ip),
        _ => None,
    }
}

/// 启动时提示的访问地址（本机 + 局域网），方便现场手机扫码访问
pub fn advertised_urls(port: u16) -> Vec<String> {
    let mut urls = vec![format!("http://localhost:{port}")];

    let host = gethostname::gethostname().to_string_lossy().to_string();
    if !host.is_empty() && host != "localhost" {
        urls.push(format!("http://{host}:{port}"));
    }
    if let Some(ip) = primary_ipv4() {
        urls.push(format!("http://{ip}:{port}"));
    }
    urls
}
