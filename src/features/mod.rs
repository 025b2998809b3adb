/// 管理员查看/导出
pub mod admin;

/// 访客签到
pub mod checkin;

/// 签到入口二维码
pub mod entry_qr;

/// 健康检查
pub mod health;
